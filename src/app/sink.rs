//! Result sinks, where controllers deliver display transitions, and the
//! grid sink the terminal UI renders from.

use tokio::sync::mpsc;

use crate::core::gif::{Gif, GifList};

/// Receives display transitions from a fetch controller, always on the
/// UI loop.
pub trait ResultSink {
    fn on_loading(&mut self);
    /// The fetch behind the last `on_loading` was cancelled before it
    /// finished; stop showing progress.
    fn on_idle(&mut self);
    /// Replaces whatever list was shown before.  Never called with an
    /// empty list.
    fn on_content(&mut self, gifs: GifList);
    fn on_error(&mut self, message: &str);
}

/// Told about the GIF the user picked.
pub trait GifSelectListener {
    fn on_gif_selected(&mut self, gif: &Gif);
}

/// Hands selections to whoever holds the receiving end.
impl GifSelectListener for mpsc::UnboundedSender<Gif> {
    fn on_gif_selected(&mut self, gif: &Gif) {
        if self.send(gif.clone()).is_err() {
            tracing::debug!(id = %gif.id, "selection dropped: receiver closed");
        }
    }
}

/// Which panel the grid area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridStatus {
    /// Nothing requested yet (search view before the first submit).
    #[default]
    Empty,
    Loading,
    Content,
    Error(String),
}

/// Grid of GIFs with a movable highlight.
pub struct GifGrid {
    status: GridStatus,
    /// What was shown before the current loading panel.
    before_loading: GridStatus,
    gifs: GifList,
    selected: usize,
    columns: usize,
    listener: Option<Box<dyn GifSelectListener>>,
}

impl GifGrid {
    pub fn new(columns: usize) -> Self {
        Self {
            status: GridStatus::default(),
            before_loading: GridStatus::default(),
            gifs: Vec::new(),
            selected: 0,
            columns: columns.max(1),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl GifSelectListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn status(&self) -> &GridStatus {
        &self.status
    }

    pub fn gifs(&self) -> &[Gif] {
        &self.gifs
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Number of GIFs on screen; zero unless the content panel is up.
    pub fn shown_count(&self) -> usize {
        match self.status {
            GridStatus::Content => self.gifs.len(),
            _ => 0,
        }
    }

    /// Only meaningful while the content panel is up.
    pub fn highlighted(&self) -> Option<&Gif> {
        match self.status {
            GridStatus::Content => self.gifs.get(self.selected),
            _ => None,
        }
    }

    /// Forward the highlighted GIF to the listener.  Returns the GIF that
    /// was forwarded, if any.
    pub fn select_highlighted(&mut self) -> Option<Gif> {
        let gif = self.highlighted()?.clone();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_gif_selected(&gif);
        }
        Some(gif)
    }

    // ── navigation ──────────────────────────────────────────────

    pub fn move_left(&mut self) {
        if self.selected % self.columns > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_right(&mut self) {
        let at_row_end = self.selected % self.columns == self.columns - 1;
        if !at_row_end && self.selected + 1 < self.gifs.len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.columns);
    }

    /// Returns `false` when already on the last row.
    pub fn move_down(&mut self) -> bool {
        let below = self.selected + self.columns;
        if below < self.gifs.len() {
            self.selected = below;
            true
        } else {
            false
        }
    }

    /// `true` when the highlight sits on the first row.
    pub fn on_top_row(&self) -> bool {
        self.selected < self.columns
    }
}

impl ResultSink for GifGrid {
    fn on_loading(&mut self) {
        if self.status != GridStatus::Loading {
            self.before_loading = std::mem::replace(&mut self.status, GridStatus::Loading);
        }
    }

    fn on_idle(&mut self) {
        if self.status == GridStatus::Loading {
            self.status = std::mem::take(&mut self.before_loading);
        }
    }

    fn on_content(&mut self, gifs: GifList) {
        self.gifs = gifs;
        self.selected = 0;
        self.status = GridStatus::Content;
    }

    fn on_error(&mut self, message: &str) {
        self.status = GridStatus::Error(message.to_string());
    }
}
