use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::PhraseId;

//
// ─── LANGUAGE ──────────────────────────────────────────────────────────────────
//

/// Validated language name (trimmed, non-empty).
///
/// Comparison is case-insensitive so pools filtered as "german" also match
/// phrases stored as "German".
#[derive(Debug, Clone, Eq)]
pub struct Language(String);

impl Language {
    /// Create a validated language name.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError::EmptyLanguage` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PhraseError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhraseError::EmptyLanguage);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::hash::Hash for Language {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── TAG ───────────────────────────────────────────────────────────────────────
//

/// Validated tag name (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Create a validated tag.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError::EmptyTag` if the tag is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PhraseError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PhraseError::EmptyTag);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── PHRASE ────────────────────────────────────────────────────────────────────
//

/// A translation pair available to quiz sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    id: PhraseId,
    source_text: String,
    source_language: Language,
    target_text: String,
    target_language: Language,
    tags: Vec<Tag>,
}

impl Phrase {
    #[must_use]
    pub fn id(&self) -> PhraseId {
        self.id
    }

    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    #[must_use]
    pub fn source_language(&self) -> &Language {
        &self.source_language
    }

    #[must_use]
    pub fn target_text(&self) -> &str {
        &self.target_text
    }

    #[must_use]
    pub fn target_language(&self) -> &Language {
        &self.target_language
    }

    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

/// Unvalidated phrase input, as loaded from a phrase file or an editor form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhraseDraft {
    pub source_text: String,
    pub source_language: String,
    pub target_text: String,
    pub target_language: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PhraseDraft {
    /// Validate texts, languages, and tags.
    ///
    /// # Errors
    ///
    /// Returns `PhraseError` if either text is empty after trimming, or a
    /// language or tag fails validation.
    pub fn validate(self) -> Result<ValidatedPhrase, PhraseError> {
        let source_text = non_empty(self.source_text, PhraseError::EmptySourceText)?;
        let target_text = non_empty(self.target_text, PhraseError::EmptyTargetText)?;
        let source_language = Language::new(self.source_language)?;
        let target_language = Language::new(self.target_language)?;
        let tags = self
            .tags
            .into_iter()
            .map(Tag::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedPhrase {
            source_text,
            source_language,
            target_text,
            target_language,
            tags,
        })
    }
}

/// A phrase that passed validation but has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPhrase {
    source_text: String,
    source_language: Language,
    target_text: String,
    target_language: Language,
    tags: Vec<Tag>,
}

impl ValidatedPhrase {
    #[must_use]
    pub fn assign_id(self, id: PhraseId) -> Phrase {
        Phrase {
            id,
            source_text: self.source_text,
            source_language: self.source_language,
            target_text: self.target_text,
            target_language: self.target_language,
            tags: self.tags,
        }
    }
}

fn non_empty(raw: String, err: PhraseError) -> Result<String, PhraseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

//
// ─── LANGUAGE FILTER ───────────────────────────────────────────────────────────
//

/// Selects the candidate pool for a session: a language pair, optionally
/// narrowed to a single tag.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageFilter {
    source: Language,
    target: Language,
    tag: Option<Tag>,
}

impl LanguageFilter {
    #[must_use]
    pub fn new(source: Language, target: Language) -> Self {
        Self {
            source,
            target,
            tag: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub fn source(&self) -> &Language {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &Language {
        &self.target
    }

    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    /// Whether a phrase belongs to the pool this filter describes.
    #[must_use]
    pub fn matches(&self, phrase: &Phrase) -> bool {
        if phrase.source_language() != &self.source {
            return false;
        }
        if phrase.target_language() != &self.target {
            return false;
        }
        match &self.tag {
            Some(tag) => phrase.has_tag(tag),
            None => true,
        }
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PhraseError {
    #[error("source text cannot be empty")]
    EmptySourceText,
    #[error("target text cannot be empty")]
    EmptyTargetText,
    #[error("language name cannot be empty")]
    EmptyLanguage,
    #[error("tag cannot be empty")]
    EmptyTag,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(source: &str, target: &str) -> PhraseDraft {
        PhraseDraft {
            source_text: source.to_string(),
            source_language: "German".to_string(),
            target_text: target.to_string(),
            target_language: "English".to_string(),
            tags: vec!["food".to_string()],
        }
    }

    #[test]
    fn draft_validates_and_assigns_id() {
        let phrase = draft("der Apfel", "the apple")
            .validate()
            .unwrap()
            .assign_id(PhraseId::new(1));

        assert_eq!(phrase.id(), PhraseId::new(1));
        assert_eq!(phrase.source_text(), "der Apfel");
        assert_eq!(phrase.tags().len(), 1);
    }

    #[test]
    fn draft_rejects_blank_text() {
        let err = draft("   ", "the apple").validate().unwrap_err();
        assert_eq!(err, PhraseError::EmptySourceText);
    }

    #[test]
    fn draft_trims_text() {
        let phrase = draft("  der Apfel  ", "the apple")
            .validate()
            .unwrap()
            .assign_id(PhraseId::new(1));
        assert_eq!(phrase.source_text(), "der Apfel");
    }

    #[test]
    fn language_comparison_ignores_case() {
        assert_eq!(Language::new("German").unwrap(), Language::new("german").unwrap());
    }

    #[test]
    fn filter_matches_language_pair_and_tag() {
        let phrase = draft("der Apfel", "the apple")
            .validate()
            .unwrap()
            .assign_id(PhraseId::new(1));

        let filter = LanguageFilter::new(
            Language::new("german").unwrap(),
            Language::new("english").unwrap(),
        );
        assert!(filter.matches(&phrase));

        let tagged = filter.clone().with_tag(Tag::new("food").unwrap());
        assert!(tagged.matches(&phrase));

        let other_tag = filter.with_tag(Tag::new("travel").unwrap());
        assert!(!other_tag.matches(&phrase));
    }

    #[test]
    fn filter_rejects_other_language_pair() {
        let phrase = draft("der Apfel", "the apple")
            .validate()
            .unwrap()
            .assign_id(PhraseId::new(1));

        let filter = LanguageFilter::new(
            Language::new("French").unwrap(),
            Language::new("English").unwrap(),
        );
        assert!(!filter.matches(&phrase));
    }
}
