use std::sync::Arc;

use quiz_core::model::LanguageFilter;
use services::QuizLoopService;

pub trait UiApp: Send + Sync {
    /// Language pair (and optional tag) quizzes are built from.
    fn default_filter(&self) -> LanguageFilter;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    default_filter: LanguageFilter,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            default_filter: app.default_filter(),
            quiz_loop: app.quiz_loop(),
        }
    }

    #[must_use]
    pub fn default_filter(&self) -> LanguageFilter {
        self.default_filter.clone()
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
