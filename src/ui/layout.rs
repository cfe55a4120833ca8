//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: view tabs on top, an optional search box, the grid, and
/// a bottom status bar.
pub struct AppLayout {
    pub tabs_area: Rect,
    /// Zero-height when the trending view is shown.
    pub search_area: Rect,
    pub grid_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, with_search: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                                 // tabs
                Constraint::Length(if with_search { 3 } else { 0 }), // search box
                Constraint::Min(3),                                    // grid (takes the rest)
                Constraint::Length(1),                                 // status bar
            ])
            .split(area);

        Self {
            tabs_area: chunks[0],
            search_area: chunks[1],
            grid_area: chunks[2],
            status_area: chunks[3],
        }
    }
}
