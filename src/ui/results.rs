//! Results screen: headline stats and the scrollable per-question review.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::core::engine::QuizEngine;
use crate::core::review::{review, Outcome, ReviewEntry, Summary};

use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Scroll position of the review list, in lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReviewScroll {
    pub offset: usize,
}

impl ReviewScroll {
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Unbounded here; clamped against the content at render time.
    pub fn scroll_down(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }

    fn clamp(&mut self, content_rows: usize, viewport: usize) {
        let max = content_rows.saturating_sub(viewport.max(1));
        self.offset = self.offset.min(max);
    }
}

// ───────────────────────────────────────── widget ────────────

pub struct ResultsView<'a> {
    pub engine: &'a QuizEngine,
}

impl StatefulWidget for ResultsView<'_> {
    type State = ReviewScroll;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [stats, details] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(3)]).areas(area);

        render_stats(&Summary::of(self.engine), stats, buf);

        let block = Block::default()
            .title(" Detailed Results ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(details);

        let lines: Vec<Line> = review(self.engine.questions(), self.engine.answers())
            .flat_map(review_lines)
            .collect();
        // Scroll works in wrapped rows, so clamp against those.
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        state.clamp(paragraph.line_count(inner.width), inner.height as usize);

        paragraph
            .block(block)
            .scroll((u16::try_from(state.offset).unwrap_or(u16::MAX), 0))
            .render(details, buf);
    }
}

fn render_stats(summary: &Summary, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Quiz Complete! ")
        .title_style(Theme::title_style())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style());
    let inner = block.inner(area);
    block.render(area, buf);

    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(inner);
    let stats = [
        (summary.score_label(), "Correct Answers"),
        (summary.percentage_label(), "Accuracy"),
        (summary.elapsed.clone(), "Time Taken"),
    ];
    for (column, (value, caption)) in columns.iter().zip(stats) {
        Paragraph::new(vec![
            Line::raw(""),
            Line::from(Span::styled(value, Theme::stat_value_style())),
            Line::from(Span::styled(caption, Theme::dim_style())),
        ])
        .centered()
        .render(*column, buf);
    }
}

/// Lines for one reviewed question, followed by a blank separator.
fn review_lines(entry: ReviewEntry<'_>) -> Vec<Line<'_>> {
    let (icon, icon_style) = if entry.is_correct() {
        ("✓", Theme::correct_style())
    } else {
        ("✗", Theme::incorrect_style())
    };
    let answer_style: Style = match entry.outcome {
        Outcome::Correct => Theme::correct_style(),
        Outcome::Incorrect => Theme::incorrect_style(),
        Outcome::Unanswered => Theme::unanswered_style(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {icon} "), icon_style),
            Span::styled(entry.question.prompt.as_str(), Theme::prompt_style()),
        ]),
        Line::from(Span::styled(
            format!("     Your answer: {}", entry.your_answer_label()),
            answer_style,
        )),
    ];
    if let Some(correction) = entry.correction_label() {
        lines.push(Line::from(Span::styled(
            format!("     Correct answer: {correction}"),
            Theme::correct_style(),
        )));
    }
    lines.push(Line::raw(""));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_last_page_visible() {
        let mut scroll = ReviewScroll { offset: 500 };
        scroll.clamp(80, 20);
        assert_eq!(scroll.offset, 60);

        let mut scroll = ReviewScroll { offset: 3 };
        scroll.clamp(10, 20);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn scroll_up_stops_at_top() {
        let mut scroll = ReviewScroll::default();
        scroll.scroll_up();
        assert_eq!(scroll.offset, 0);
        scroll.scroll_down();
        scroll.scroll_down();
        scroll.scroll_up();
        assert_eq!(scroll.offset, 1);
    }
}
