//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme. Colours changed here propagate everywhere.
pub struct Theme;

impl Theme {
    // ── question card ──────────────────────────────────────────
    pub fn prompt_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn option_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn option_key_style() -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
    }

    pub fn selected_option_style() -> Style {
        Style::default()
            .fg(Color::LightBlue)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn progress_style() -> Style {
        Style::default().fg(Color::Magenta).bg(Color::DarkGray)
    }

    pub fn answered_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn accent_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    // ── results ────────────────────────────────────────────────
    pub fn correct_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn incorrect_style() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn unanswered_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn stat_value_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
