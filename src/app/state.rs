//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Every mutation, fetch results included, happens on the UI loop.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::controller::{SearchController, TrendingController};
use crate::app::fetch_runtime::FetchUpdate;
use crate::app::sink::GifGrid;
use crate::config::AppConfig;
use crate::core::gif::Gif;
use crate::core::request::RequestKind;
use crate::provider::GifProvider;

/// Which view is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Trending,
    Search,
}

/// Where keys go while the search view is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    #[default]
    Input,
    Grid,
}

/// Top-level application state.
pub struct AppState {
    pub active_view: ActiveView,
    pub trending: TrendingController<GifGrid>,
    pub search: SearchController<GifGrid>,
    /// Text in the search box.
    pub query: String,
    pub search_focus: SearchFocus,
    /// The GIF the user picked; printed on exit.
    pub selected_gif: Option<Gif>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Monotonic tick counter (drives the loading spinner).
    pub tick: u64,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn GifProvider>,
        updates: mpsc::UnboundedSender<FetchUpdate>,
        selections: mpsc::UnboundedSender<Gif>,
    ) -> Self {
        let trending_grid = GifGrid::new(config.columns).with_listener(selections.clone());
        let search_grid = GifGrid::new(config.columns).with_listener(selections);
        Self {
            active_view: ActiveView::default(),
            trending: TrendingController::new(
                Arc::clone(&provider),
                updates.clone(),
                trending_grid,
                config.limit,
            ),
            search: SearchController::new(provider, updates, search_grid, config.limit),
            query: String::new(),
            search_focus: SearchFocus::default(),
            selected_gif: None,
            should_quit: false,
            tick: 0,
        }
    }

    /// Switch views, deactivating the one being left.
    pub fn show(&mut self, view: ActiveView) {
        if view == self.active_view && self.view_is_live() {
            return;
        }
        match self.active_view {
            ActiveView::Trending => self.trending.deactivate(),
            ActiveView::Search => self.search.teardown(),
        }
        self.active_view = view;
        match view {
            ActiveView::Trending => {
                self.trending.activate();
            }
            ActiveView::Search => self.search_focus = SearchFocus::Input,
        }
    }

    fn view_is_live(&self) -> bool {
        match self.active_view {
            ActiveView::Trending => self.trending.is_active(),
            ActiveView::Search => true,
        }
    }

    /// Submit the search box contents.  Empty input is ignored.
    pub fn submit_query(&mut self) {
        if self.search.submit(&self.query).is_some() {
            self.search_focus = SearchFocus::Grid;
        }
    }

    /// Grid of the view currently shown.
    pub fn grid(&self) -> &GifGrid {
        match self.active_view {
            ActiveView::Trending => self.trending.sink(),
            ActiveView::Search => self.search.sink(),
        }
    }

    pub fn grid_mut(&mut self) -> &mut GifGrid {
        match self.active_view {
            ActiveView::Trending => self.trending.sink_mut(),
            ActiveView::Search => self.search.sink_mut(),
        }
    }

    /// Route a finished fetch to the controller that started it.
    pub fn apply_fetch_update(&mut self, update: FetchUpdate) -> bool {
        match update.kind {
            RequestKind::Trending => self.trending.handle_update(update),
            RequestKind::Search => self.search.handle_update(update),
        }
    }

    /// Cancel everything in flight before the loop exits.
    pub fn teardown(&mut self) {
        self.trending.deactivate();
        self.search.teardown();
    }
}
