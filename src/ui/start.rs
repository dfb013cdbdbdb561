//! Welcome card shown before the quiz begins.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::config::{Action, AppConfig};
use crate::core::question::QuestionSet;

use super::layout::centered_fixed;
use super::theme::Theme;

pub struct StartScreen<'a> {
    pub questions: &'a QuestionSet,
    pub config: &'a AppConfig,
}

impl Widget for StartScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let card = centered_fixed(60, 13, area);

        let block = Block::default()
            .title(format!(" {} ", self.questions.title()))
            .title_style(Theme::title_style())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());

        let count = self.questions.len();
        let lines = vec![
            Line::raw(""),
            Line::raw(format!(
                "Test your knowledge with {count} multiple-choice questions."
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled(format!("Questions: {count}"), Theme::accent_style()),
                Span::raw("      "),
                Span::styled("Time: No limit", Theme::accent_style()),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                format!(
                    "Press {} to start",
                    self.config.short_binding(Action::Start)
                ),
                Theme::answered_style(),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                format!("{}: controls", self.config.short_binding(Action::Help)),
                Theme::dim_style(),
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(card, buf);
    }
}
