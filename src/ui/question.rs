//! The answering screen: progress header, question card, navigation bar.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::config::{Action, AppConfig};
use crate::core::engine::{format_elapsed, QuizEngine};
use crate::core::question::OptionKey;

use super::theme::Theme;

pub struct QuestionView<'a> {
    pub engine: &'a QuizEngine,
    pub config: &'a AppConfig,
    /// Wall-clock time for the live timer.
    pub now: DateTime<Utc>,
}

impl Widget for QuestionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header, card, nav] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(header, buf);
        self.render_card(card, buf);
        self.render_nav(nav, buf);
    }
}

impl QuestionView<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.engine;
        let total = engine.question_count();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let [counts, bar] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        let mut left = vec![Span::raw(format!(
            " Question {} of {total}",
            engine.current_index() + 1
        ))];
        if self.config.show_timer {
            if let Some(running) = engine.running_time(self.now) {
                left.push(Span::styled(
                    format!("   ⏱ {}", format_elapsed(running)),
                    Theme::dim_style(),
                ));
            }
        }
        Paragraph::new(Line::from(left)).render(counts, buf);
        Paragraph::new(format!("Answered: {}/{total} ", engine.answered_count()))
            .right_aligned()
            .render(counts, buf);

        let fraction = engine.progress_fraction().clamp(0.0, 1.0);
        Gauge::default()
            .ratio(fraction)
            .gauge_style(Theme::progress_style())
            .label(format!("{:.0}%", fraction * 100.0))
            .render(bar, buf);
    }

    fn render_card(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.engine;
        let question = engine.current_question();
        let selected = engine.answer_for(engine.current_index());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());

        let mut lines = vec![
            Line::from(Span::styled(question.prompt.as_str(), Theme::prompt_style())),
            Line::raw(""),
        ];
        for key in OptionKey::ALL {
            let is_selected = selected == Some(key);
            let (marker, text_style) = if is_selected {
                ("▸ ", Theme::selected_option_style())
            } else {
                ("  ", Theme::option_style())
            };
            let key_style = if is_selected {
                Theme::selected_option_style()
            } else {
                Theme::option_key_style()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{key}) "), key_style),
                Span::styled(question.option(key), text_style),
            ]));
            lines.push(Line::raw(""));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let engine = self.engine;
        let config = self.config;

        let prev_style = if engine.is_first() {
            Theme::dim_style()
        } else {
            Theme::accent_style()
        };
        Paragraph::new(Span::styled(
            format!(" ‹ Previous ({})", config.short_binding(Action::Previous)),
            prev_style,
        ))
        .render(area, buf);

        if engine.answers().contains(engine.current_index()) {
            Paragraph::new(Span::styled("✓ Answered", Theme::answered_style()))
                .centered()
                .render(area, buf);
        }

        let next = if engine.is_last() {
            Span::styled(
                format!("Finish Quiz ({}) ", config.short_binding(Action::Finish)),
                Theme::answered_style(),
            )
        } else {
            Span::styled(
                format!("({}) Next › ", config.short_binding(Action::Next)),
                Theme::accent_style(),
            )
        };
        Paragraph::new(next).right_aligned().render(area, buf);
    }
}
