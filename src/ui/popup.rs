//! Popup overlay widgets for the controls list and the finish confirmation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};

use super::layout::centered_fixed;

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

// ───────────────────────────────────────── help popup ────────

/// Read-only list of every action and its bindings.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + 2 blanks + hint + 2 border
        let height = (Action::ALL.len() as u16) + 5;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = Style::default().fg(Color::Yellow);
        let mut lines = vec![Line::raw("")];

        for &action in Action::ALL {
            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("   {:<22}", action.label());
            let keys_width = (inner.width as usize).saturating_sub(label_col.len() + 1).max(1);
            let keys = self.config.display_bindings(action);
            lines.push(Line::from(vec![
                Span::styled(label_col, Style::default().fg(Color::White)),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Esc/Enter: close   Ctrl+c: quit anywhere",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── confirm popup ─────

/// "Finish with N unanswered questions?" prompt.
pub struct ConfirmFinishPopup {
    pub unanswered: usize,
}

impl Widget for ConfirmFinishPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_fixed(46, 7, area);
        Clear.render(popup, buf);

        let block = popup_block(" Finish Quiz? ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let noun = if self.unanswered == 1 { "question is" } else { "questions are" };
        let lines = vec![
            Line::raw(""),
            Line::raw(format!("{} {noun} still unanswered.", self.unanswered)),
            Line::raw(""),
            Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw(": finish   "),
                Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::raw(": keep answering"),
            ]),
        ];

        Paragraph::new(lines).centered().render(inner, buf);
    }
}
