use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{Language, LanguageFilter, PhraseDraft, PhraseId, Tag};
use quiz_core::pacing::TimeBudgetBounds;
use services::{Clock, QuizLoopService};
use storage::{PhraseRepository, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLanguage { raw: String },
    InvalidTag { raw: String },
    InvalidBudget { flag: &'static str, raw: String },
    InvalidPhraseFile { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLanguage { raw } => write!(f, "invalid language: {raw}"),
            ArgsError::InvalidTag { raw } => write!(f, "invalid tag: {raw}"),
            ArgsError::InvalidBudget { flag, raw } => {
                write!(f, "invalid {flag} value: {raw}")
            }
            ArgsError::InvalidPhraseFile { raw } => write!(f, "cannot read phrase file: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    filter: LanguageFilter,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn default_filter(&self) -> LanguageFilter {
        self.filter.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

struct Args {
    phrase_file: Option<String>,
    source: Language,
    target: Language,
    tag: Option<Tag>,
    bounds: TimeBudgetBounds,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--phrases <file.json>] [--source <lang>] [--target <lang>]"
    );
    eprintln!("                      [--tag <tag>] [--min <secs>] [--start <secs>] [--max <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --source German --target English --min 5 --start 15 --max 30");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_PHRASES, QUIZ_SOURCE_LANG, QUIZ_TARGET_LANG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut phrase_file = std::env::var("QUIZ_PHRASES").ok();
        let mut source = std::env::var("QUIZ_SOURCE_LANG").unwrap_or_else(|_| "German".into());
        let mut target = std::env::var("QUIZ_TARGET_LANG").unwrap_or_else(|_| "English".into());
        let mut tag = None;
        let mut min = 5_u32;
        let mut start = 15_u32;
        let mut max = 30_u32;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--phrases" => {
                    phrase_file = Some(require_value(args, "--phrases")?);
                }
                "--source" => {
                    source = require_value(args, "--source")?;
                }
                "--target" => {
                    target = require_value(args, "--target")?;
                }
                "--tag" => {
                    let raw = require_value(args, "--tag")?;
                    let parsed =
                        Tag::new(raw.clone()).map_err(|_| ArgsError::InvalidTag { raw })?;
                    tag = Some(parsed);
                }
                "--min" => {
                    min = parse_budget(args, "--min")?;
                }
                "--start" => {
                    start = parse_budget(args, "--start")?;
                }
                "--max" => {
                    max = parse_budget(args, "--max")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg).into()),
            }
        }

        let source = Language::new(source.clone())
            .map_err(|_| ArgsError::InvalidLanguage { raw: source })?;
        let target = Language::new(target.clone())
            .map_err(|_| ArgsError::InvalidLanguage { raw: target })?;
        let bounds = TimeBudgetBounds::new(min, start, max)?;

        Ok(Self {
            phrase_file,
            source,
            target,
            tag,
            bounds,
        })
    }
}

fn parse_budget(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<u32, ArgsError> {
    let value = require_value(args, flag)?;
    value
        .parse()
        .map_err(|_| ArgsError::InvalidBudget { flag, raw: value })
}

/// Built-in starter phrases so the app is usable without a phrase file.
fn starter_drafts() -> Vec<PhraseDraft> {
    let pairs = [
        ("der Apfel", "the apple", "food"),
        ("das Brot", "the bread", "food"),
        ("die Katze", "the cat", "animals"),
        ("der Hund", "the dog", "animals"),
        ("das Haus", "the house", "home"),
        ("die Tür", "the door", "home"),
        ("der Stuhl", "the chair", "home"),
        ("das Wasser", "the water", "food"),
        ("die Straße", "the street", "city"),
        ("der Bahnhof", "the train station", "city"),
    ];

    pairs
        .into_iter()
        .map(|(source_text, target_text, tag)| PhraseDraft {
            source_text: source_text.to_string(),
            source_language: "German".to_string(),
            target_text: target_text.to_string(),
            target_language: "English".to_string(),
            tags: vec![tag.to_string()],
        })
        .collect()
}

fn load_drafts(path: &str) -> Result<Vec<PhraseDraft>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path).map_err(|_| ArgsError::InvalidPhraseFile {
        raw: path.to_string(),
    })?;
    let drafts: Vec<PhraseDraft> = serde_json::from_str(&raw)?;
    Ok(drafts)
}

async fn seed_phrases(
    repo: &dyn PhraseRepository,
    drafts: Vec<PhraseDraft>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut stored = 0_usize;
    for (index, draft) in drafts.into_iter().enumerate() {
        let id = PhraseId::new(index as u64 + 1);
        let phrase = draft.validate()?.assign_id(id);
        repo.upsert_phrase(&phrase).await?;
        stored += 1;
    }
    Ok(stored)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::in_memory();
    let drafts = match parsed.phrase_file.as_deref() {
        Some(path) => load_drafts(path)?,
        None => starter_drafts(),
    };
    let stored = seed_phrases(storage.phrases.as_ref(), drafts).await?;
    info!(phrases = stored, "phrase pool loaded");

    let quiz_loop = Arc::new(QuizLoopService::new(
        Clock::default_clock(),
        Arc::clone(&storage.phrases),
        Arc::clone(&storage.results),
        parsed.bounds,
    ));

    let mut filter = LanguageFilter::new(parsed.source, parsed.target);
    if let Some(tag) = parsed.tag {
        filter = filter.with_tag(tag);
    }

    let app = DesktopApp { filter, quiz_loop };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Phrases")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
