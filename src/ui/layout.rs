//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Widest the content column grows before it is centred.
const MAX_CONTENT_WIDTH: u16 = 90;

/// Primary screen layout with a content pane and a bottom status bar.
pub struct AppLayout {
    pub body: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // content (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            body: centered_column(chunks[0], MAX_CONTENT_WIDTH),
            status: chunks[1],
        }
    }
}

/// Horizontally centre a column of at most `max_width` cells.
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Max(max_width)])
        .flex(Flex::Center)
        .areas(area);
    column
}

/// Create a centred rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
