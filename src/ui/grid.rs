//! Custom Ratatui widget that renders a [`GifGrid`] sink: a loading
//! spinner, a status message, or a scrolling grid of GIF cards.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::sink::{GifGrid, GridStatus};

use super::spinner::LoadingIndicator;
use super::theme::Theme;

/// Rows per card: top border, title, preview URL, bottom border.
const CARD_HEIGHT: u16 = 4;

/// The grid widget itself — created fresh each frame.
pub struct GridWidget<'a> {
    grid: &'a GifGrid,
    block: Option<Block<'a>>,
    tick: u64,
    focused: bool,
    empty_hint: &'a str,
}

impl<'a> GridWidget<'a> {
    pub fn new(grid: &'a GifGrid) -> Self {
        Self {
            grid,
            block: None,
            tick: 0,
            focused: true,
            empty_hint: "",
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Unfocused grids draw no highlight.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Text shown before anything was requested.
    pub fn empty_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = hint;
        self
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match self.grid.status() {
            GridStatus::Empty => render_message(self.empty_hint, inner, buf),
            GridStatus::Loading => LoadingIndicator { tick: self.tick }.render(inner, buf),
            GridStatus::Error(message) => render_message(message, inner, buf),
            GridStatus::Content => render_cards(self.grid, self.focused, inner, buf),
        }
    }
}

fn render_message(text: &str, area: Rect, buf: &mut Buffer) {
    let y = area.y + area.height / 2;
    Paragraph::new(Line::from(Span::styled(text.to_string(), Theme::message_style())))
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, y, area.width, 1), buf);
}

fn render_cards(grid: &GifGrid, focused: bool, area: Rect, buf: &mut Buffer) {
    let columns = grid.columns() as u16;
    let cell_width = area.width / columns;
    if cell_width < 4 || area.height < CARD_HEIGHT {
        return;
    }

    let visible_rows = (area.height / CARD_HEIGHT) as usize;
    let selected_row = grid.selected() / grid.columns();
    let first_row = first_visible_row(selected_row, visible_rows);
    let text_width = cell_width.saturating_sub(2) as usize;

    for (idx, gif) in grid.gifs().iter().enumerate() {
        let row = idx / grid.columns();
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = (idx % grid.columns()) as u16;
        let cell = Rect::new(
            area.x + col * cell_width,
            area.y + (row - first_row) as u16 * CARD_HEIGHT,
            cell_width,
            CARD_HEIGHT,
        );

        let highlighted = focused && idx == grid.selected();
        let (border, title) = if highlighted {
            (Theme::selected_style(), Theme::selected_style())
        } else {
            (Theme::cell_border_style(), Theme::cell_style())
        };
        let card = Block::default().borders(Borders::ALL).border_style(border);
        let body = card.inner(cell);
        card.render(cell, buf);

        let lines = vec![
            Line::from(Span::styled(truncate_end(gif.label(), text_width), title)),
            Line::from(Span::styled(
                truncate_end(&gif.preview_url, text_width),
                Theme::url_style(),
            )),
        ];
        Paragraph::new(lines).render(body, buf);
    }
}

/// First row to draw so that `selected_row` stays on screen.
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected_row;
    }
    (selected_row + 1).saturating_sub(visible_rows)
}

/// Cut `s` to `max_chars`, marking the cut with an ellipsis.
fn truncate_end(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 1 {
        return "…".chars().take(max_chars).collect();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
