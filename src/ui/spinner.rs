//! Loading indicator — a spinner + label centred in the grid area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingIndicator {
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl LoadingIndicator {
    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()]
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 12 || area.height == 0 {
            return;
        }

        let label = format!("{} loading", self.frame());
        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width) / 2;
        let y = area.y + area.height / 2;

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, y, &line, label_width);
    }
}
