//! Input handling: maps key events to engine transitions and view changes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Action;
use crate::core::engine::Phase;
use crate::core::error::InvalidArgument;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Some terminals report releases and repeats as separate events.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Main => handle_main_key(state, key),
        ActiveView::Help => handle_help_key(state, key),
        ActiveView::ConfirmFinish => handle_confirm_key(state, key),
    }
}

// ── Phase screens (configurable bindings) ───────────────────────

fn handle_main_key(state: &mut AppState, key: KeyEvent) {
    let phase = state.engine.phase();
    let Some(action) = state.config.match_key(key, phase) else {
        return;
    };
    state.status_message = None;

    if let Err(e) = apply_action(state, action) {
        // The bindings are phase-scoped, so this means a handler bug.
        tracing::warn!(?action, %phase, "engine rejected action: {e}");
        state.status_message = Some(e.to_string());
    }
}

fn apply_action(state: &mut AppState, action: Action) -> Result<(), InvalidArgument> {
    if let Some(option) = action.option_key() {
        let current = state.engine.current_index();
        return state.engine.select_answer(current, option);
    }

    match action {
        Action::Start => {
            state.engine.start()?;
            state.review_scroll = Default::default();
        }
        Action::Next => {
            if state.engine.is_last() {
                state.status_message = Some(format!(
                    "Last question. Press {} to finish.",
                    state.config.short_binding(Action::Finish)
                ));
            }
            state.engine.go_next()?;
        }
        Action::Previous => state.engine.go_previous()?,
        Action::Finish => request_finish(state)?,
        Action::ToggleTimer => {
            state.config.show_timer = !state.config.show_timer;
            if let Err(e) = state.config.save() {
                tracing::warn!("failed to save config: {e:#}");
            }
            state.status_message = Some(format!(
                "Timer {}",
                if state.config.show_timer { "shown" } else { "hidden" }
            ));
        }
        Action::Retake => {
            state.engine.reset();
            state.review_scroll = Default::default();
        }
        Action::ScrollUp => state.review_scroll.scroll_up(),
        Action::ScrollDown => state.review_scroll.scroll_down(),
        Action::Help => state.active_view = ActiveView::Help,
        Action::Quit => state.should_quit = true,
        Action::SelectA | Action::SelectB | Action::SelectC | Action::SelectD => {}
    }
    Ok(())
}

/// Finishing is offered on the last question only.  With unanswered
/// questions left, ask first (unless the user turned that off).
fn request_finish(state: &mut AppState) -> Result<(), InvalidArgument> {
    if !state.engine.is_last() {
        state.status_message = Some(format!(
            "Finish is available on the last question ({} to go).",
            state.engine.question_count() - state.engine.current_index() - 1
        ));
        return Ok(());
    }

    let unanswered = state.engine.question_count() - state.engine.answered_count();
    if unanswered > 0 && state.config.confirm_finish {
        state.active_view = ActiveView::ConfirmFinish;
        return Ok(());
    }
    state.engine.finish()
}

// ── Overlays (hardcoded keys) ───────────────────────────────────

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
    ) {
        state.active_view = ActiveView::Main;
    }
}

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.active_view = ActiveView::Main;
            if state.engine.phase() == Phase::InProgress {
                if let Err(e) = state.engine.finish() {
                    tracing::warn!("finish after confirmation failed: {e}");
                    state.status_message = Some(e.to_string());
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Main;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::question::{OptionKey, QuestionSet};

    /// Default config with no backing file, so nothing is ever saved.
    fn app() -> AppState {
        AppState::new(QuestionSet::builtin(), AppConfig::default())
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn chr(state: &mut AppState, c: char) {
        press(state, KeyCode::Char(c));
    }

    fn goto_last(state: &mut AppState) {
        for _ in 0..state.engine.question_count() {
            press(state, KeyCode::Right);
        }
    }

    #[test]
    fn enter_starts_the_quiz() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.engine.phase(), Phase::InProgress);
        assert!(s.engine.session().started_at.is_some());
    }

    #[test]
    fn option_keys_answer_current_question() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        chr(&mut s, 'a');
        chr(&mut s, 'b');
        assert_eq!(s.engine.answer_for(0), Some(OptionKey::B));
        press(&mut s, KeyCode::Right);
        chr(&mut s, '4');
        assert_eq!(s.engine.answer_for(1), Some(OptionKey::D));
        assert_eq!(s.engine.answered_count(), 2);
    }

    #[test]
    fn option_keys_ignored_before_start() {
        let mut s = app();
        chr(&mut s, 'a');
        assert!(s.engine.answers().is_empty());
        assert!(s.status_message.is_none());
    }

    #[test]
    fn toggle_timer_flips_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut s = AppState::new(QuestionSet::builtin(), AppConfig::load_from(&path));
        press(&mut s, KeyCode::Enter);

        chr(&mut s, 't');
        assert!(!s.config.show_timer);
        assert_eq!(s.status_message.as_deref(), Some("Timer hidden"));
        assert!(!AppConfig::load_from(&path).show_timer);

        chr(&mut s, 't');
        assert!(s.config.show_timer);
        assert!(AppConfig::load_from(&path).show_timer);
    }

    #[test]
    fn shifted_letter_still_answers() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT));
        assert_eq!(s.engine.answer_for(0), Some(OptionKey::C));
    }

    #[test]
    fn finish_only_on_last_question() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        chr(&mut s, 'f');
        assert_eq!(s.engine.phase(), Phase::InProgress);
        assert!(s.status_message.is_some());

        goto_last(&mut s);
        assert!(s.engine.is_last());
        s.config.confirm_finish = false;
        chr(&mut s, 'f');
        assert_eq!(s.engine.phase(), Phase::Finished);
    }

    #[test]
    fn unanswered_questions_ask_for_confirmation() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        goto_last(&mut s);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.active_view, ActiveView::ConfirmFinish);
        assert_eq!(s.engine.phase(), Phase::InProgress);

        chr(&mut s, 'n');
        assert_eq!(s.active_view, ActiveView::Main);
        assert_eq!(s.engine.phase(), Phase::InProgress);

        press(&mut s, KeyCode::Enter);
        chr(&mut s, 'y');
        assert_eq!(s.active_view, ActiveView::Main);
        assert_eq!(s.engine.phase(), Phase::Finished);
    }

    #[test]
    fn fully_answered_quiz_finishes_without_prompt() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        for i in 0..s.engine.question_count() {
            let key = s.engine.questions().get(i).unwrap().answer;
            chr(&mut s, key.letter().to_ascii_lowercase());
            press(&mut s, KeyCode::Right);
        }
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.engine.phase(), Phase::Finished);
        assert_eq!(s.engine.score(), 20);
    }

    #[test]
    fn next_on_last_question_hints_at_finish() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        goto_last(&mut s);
        assert_eq!(s.engine.current_index(), 19);
        assert!(s.status_message.as_deref().unwrap_or("").contains("finish"));
    }

    #[test]
    fn previous_at_first_question_stays_put() {
        let mut s = app();
        press(&mut s, KeyCode::Enter);
        press(&mut s, KeyCode::Left);
        assert_eq!(s.engine.current_index(), 0);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn retake_returns_to_start_screen() {
        let mut s = app();
        s.config.confirm_finish = false;
        press(&mut s, KeyCode::Enter);
        chr(&mut s, 'c');
        goto_last(&mut s);
        chr(&mut s, 'f');
        press(&mut s, KeyCode::Down);
        assert_eq!(s.review_scroll.offset, 1);

        chr(&mut s, 'r');
        assert_eq!(s.engine.phase(), Phase::NotStarted);
        assert!(s.engine.answers().is_empty());
        assert_eq!(s.review_scroll.offset, 0);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut s = app();
        chr(&mut s, '?');
        assert_eq!(s.active_view, ActiveView::Help);
        press(&mut s, KeyCode::Enter);
        assert_eq!(s.active_view, ActiveView::Main);
        assert_eq!(s.engine.phase(), Phase::NotStarted);
    }

    #[test]
    fn quit_and_ctrl_c() {
        let mut s = app();
        chr(&mut s, 'q');
        assert!(s.should_quit);

        let mut s = app();
        press(&mut s, KeyCode::Enter);
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
        assert_eq!(s.engine.answers().len(), 0);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut s = app();
        let mut ev = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        handle_key(&mut s, ev);
        assert_eq!(s.engine.phase(), Phase::NotStarted);
    }
}
