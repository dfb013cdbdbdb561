//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The quiz session itself sits inside [`QuizEngine`] and only changes
//! through the engine's transitions.

use crate::config::AppConfig;
use crate::core::engine::QuizEngine;
use crate::core::question::QuestionSet;
use crate::ui::results::ReviewScroll;

/// Which overlay, if any, sits on top of the phase's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Main,
    Help,
    /// "Finish with unanswered questions?" prompt.
    ConfirmFinish,
}

/// Top-level application state.
pub struct AppState {
    pub engine: QuizEngine,
    pub config: AppConfig,
    pub active_view: ActiveView,
    /// Scroll position of the detailed results list.
    pub review_scroll: ReviewScroll,
    /// One-shot message shown in the bottom bar instead of the key hint.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(questions: QuestionSet, config: AppConfig) -> Self {
        Self {
            engine: QuizEngine::new(questions),
            config,
            active_view: ActiveView::default(),
            review_scroll: ReviewScroll::default(),
            status_message: None,
            should_quit: false,
        }
    }
}
