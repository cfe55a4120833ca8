//! Search box widget (query input with a focus marker and submit hint).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

pub struct SearchBox<'a> {
    pub query: &'a str,
    pub has_focus: bool,
    /// A submitted query is still being fetched.
    pub in_flight: bool,
}

impl Widget for SearchBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.has_focus {
            " Search [typing] "
        } else {
            " Search "
        };
        let block = Block::default()
            .title(title)
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(if self.has_focus {
                Theme::command_input_style()
            } else {
                Theme::border_style()
            });
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut spans = vec![
            Span::styled("> ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(self.query.to_string(), Theme::command_input_style()),
        ];
        if self.has_focus {
            spans.push(Span::styled("▏", Theme::command_input_style()));
        }
        let hint = if self.query.is_empty() {
            "type a query, Enter to search"
        } else if self.in_flight {
            "searching…"
        } else {
            ""
        };
        if !hint.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(hint, Theme::message_style()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
