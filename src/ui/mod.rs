//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer reads the quiz engine through [`AppState`] and turns it into
//! cells on the terminal.  It never calls an engine transition.

pub mod layout;
pub mod popup;
pub mod question;
pub mod results;
pub mod start;
pub mod theme;

use chrono::Utc;
use ratatui::{widgets::Paragraph, Frame};

use crate::app::state::{ActiveView, AppState};
use crate::core::engine::Phase;

use self::layout::AppLayout;
use self::popup::{ConfirmFinishPopup, HelpPopup};
use self::question::QuestionView;
use self::results::ResultsView;
use self::start::StartScreen;
use self::theme::Theme;

/// Render one frame.  Takes `&mut` only for the review scroll clamp.
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    let phase = state.engine.phase();

    match phase {
        Phase::NotStarted => frame.render_widget(
            StartScreen {
                questions: state.engine.questions(),
                config: &state.config,
            },
            layout.body,
        ),
        Phase::InProgress => frame.render_widget(
            QuestionView {
                engine: &state.engine,
                config: &state.config,
                now: Utc::now(),
            },
            layout.body,
        ),
        Phase::Finished => frame.render_stateful_widget(
            ResultsView {
                engine: &state.engine,
            },
            layout.body,
            &mut state.review_scroll,
        ),
    }

    let hint = state.config.status_bar_hint(phase);
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(format!(" {status_text}")).style(Theme::status_bar_style()),
        layout.status,
    );

    match state.active_view {
        ActiveView::Help => frame.render_widget(
            HelpPopup {
                config: &state.config,
            },
            frame.area(),
        ),
        ActiveView::ConfirmFinish => frame.render_widget(
            ConfirmFinishPopup {
                unanswered: state.engine.question_count() - state.engine.answered_count(),
            },
            frame.area(),
        ),
        ActiveView::Main => {}
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::AppConfig;
    use crate::core::question::{OptionKey, QuestionSet};

    fn render(state: &mut AppState) -> String {
        render_sized(state, 100, 40)
    }

    fn render_sized(state: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> AppState {
        AppState::new(QuestionSet::builtin(), AppConfig::default())
    }

    #[test]
    fn start_screen_shows_title_and_count() {
        let mut state = app();
        let screen = render(&mut state);
        assert!(screen.contains("ML/NLP Quiz"));
        assert!(screen.contains("Questions: 20"));
        assert!(screen.contains("Time: No limit"));
    }

    #[test]
    fn question_screen_shows_progress_and_options() {
        let mut state = app();
        state.engine.start().unwrap();
        state.engine.select_answer(0, OptionKey::B).unwrap();
        let screen = render(&mut state);
        assert!(screen.contains("Question 1 of 20"));
        assert!(screen.contains("Answered: 1/20"));
        assert!(screen.contains("Confusion Matrix"));
        assert!(screen.contains("Ham → Spam"));
        assert!(screen.contains("✓ Answered"));
        assert!(screen.contains("Next"));
    }

    #[test]
    fn last_question_offers_finish() {
        let mut state = app();
        state.engine.start().unwrap();
        for _ in 0..19 {
            state.engine.go_next().unwrap();
        }
        let screen = render(&mut state);
        assert!(screen.contains("Question 20 of 20"));
        assert!(screen.contains("Finish Quiz"));
    }

    #[test]
    fn results_screen_shows_summary_and_review() {
        let mut state = app();
        state.engine.start().unwrap();
        state.engine.select_answer(0, OptionKey::B).unwrap();
        state.engine.finish().unwrap();
        let screen = render(&mut state);
        assert!(screen.contains("1/20"));
        assert!(screen.contains("5.0%"));
        assert!(screen.contains("Your answer: B) Ham → Spam"));
        assert!(screen.contains("Not answered"));
    }

    #[test]
    fn narrow_results_scroll_down_to_last_question() {
        let mut state = app();
        state.engine.start().unwrap();
        state.engine.finish().unwrap();
        for _ in 0..1000 {
            state.review_scroll.scroll_down();
        }
        let screen = render_sized(&mut state, 50, 30);
        assert!(screen.contains("Q20."), "last question hidden:\n{screen}");
        assert!(!screen.contains("Confusion Matrix"));

        // Clamped to the wrapped bottom, not left at 1000.
        assert!((1..1000).contains(&state.review_scroll.offset));
    }

    #[test]
    fn overlays_render_on_top() {
        let mut state = app();
        state.active_view = ActiveView::Help;
        assert!(render(&mut state).contains("Finish Quiz"));

        state.engine.start().unwrap();
        state.active_view = ActiveView::ConfirmFinish;
        assert!(render(&mut state).contains("20 questions are still unanswered."));
    }
}
