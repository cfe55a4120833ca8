//! A terminal GIF keyboard.
//!
//! Browse trending GIFs or search, pick one with Enter, and its URL is
//! printed to stdout once the terminal is restored:
//!
//! ```sh
//! gif-keyboard --catalog gifs.json | xclip -selection clipboard
//! ```

mod app;
mod config;
mod core;
mod provider;
mod ui;

use std::io::{self, stderr};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    fetch_runtime::FetchUpdate,
    handler,
    state::{ActiveView, AppState, SearchFocus},
};
use crate::config::AppConfig;
use crate::core::gif::Gif;
use crate::provider::{catalog::CatalogProvider, giphy::GiphyProvider, GifProvider};
use crate::ui::{grid::GridWidget, layout::AppLayout, search::SearchBox, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal GIF picker")]
struct Cli {
    /// Local JSON catalog to browse instead of Giphy.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Giphy API key.
    #[arg(long = "giphy-key", env = "GIPHY_API_KEY", hide_env_values = true)]
    giphy_key: Option<String>,

    /// Results per fetch (1-50).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: Option<u32>,

    /// Grid columns (1-6).
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=6))]
    columns: Option<u16>,

    /// Open on the search view with this query already submitted.
    #[arg(long)]
    search: Option<String>,

    /// Write the effective settings to the config file and exit.
    #[arg(long = "save-config")]
    save_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    fn merge_into(&self, config: &mut AppConfig) {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if let Some(key) = &self.giphy_key {
            config.giphy_api_key = Some(key.clone());
        }
        if let Some(limit) = self.limit.and_then(NonZeroU32::new) {
            config.limit = limit;
        }
        if let Some(columns) = self.columns {
            config.columns = usize::from(columns);
        }
    }
}

/// Catalog wins when configured; otherwise Giphy needs a key.
fn build_provider(config: &AppConfig) -> Result<Arc<dyn GifProvider>> {
    if let Some(path) = &config.catalog_path {
        let catalog = CatalogProvider::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        tracing::info!(entries = catalog.len(), "using local catalog");
        return Ok(Arc::new(catalog));
    }
    if let Some(key) = &config.giphy_api_key {
        let giphy = GiphyProvider::new(key.clone(), config.rating.clone(), config.request_timeout())
            .context("building Giphy client")?;
        return Ok(Arc::new(giphy));
    }
    bail!(
        "no GIF source configured: pass --catalog <file.json>, or set GIPHY_API_KEY / --giphy-key \
         (or put catalog_path / giphy_api_key in {})",
        config::config_path().display()
    )
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &AppState) {
    let on_search = state.active_view == ActiveView::Search;
    let layout = AppLayout::from_area(frame.area(), on_search);

    let tabs = Line::from(vec![
        Span::styled(" Trending ", Theme::tab_style(!on_search)),
        Span::raw(" "),
        Span::styled(" Search ", Theme::tab_style(on_search)),
    ]);
    frame.render_widget(Paragraph::new(tabs), layout.tabs_area);

    if on_search {
        frame.render_widget(
            SearchBox {
                query: &state.query,
                has_focus: state.search_focus == SearchFocus::Input,
                in_flight: state.search.is_fetching(),
            },
            layout.search_area,
        );
    }

    let title = match state.active_view {
        ActiveView::Trending => " Trending GIFs ".to_string(),
        ActiveView::Search => format!(" Results ({}) ", state.grid().shown_count()),
    };
    let grid_block = Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    let grid_focused = !on_search || state.search_focus == SearchFocus::Grid;
    frame.render_widget(
        GridWidget::new(state.grid())
            .block(grid_block)
            .tick(state.tick)
            .focused(grid_focused)
            .empty_hint("Search for a GIF above."),
        layout.grid_area,
    );

    let hint = match (state.active_view, state.search_focus) {
        (ActiveView::Search, SearchFocus::Input) => "Enter: search | ↓: results | Tab: trending | Esc: quit",
        (ActiveView::Search, SearchFocus::Grid) => "arrows: move | Enter: pick | /: edit query | Tab: trending | Esc: quit",
        (ActiveView::Trending, _) => "arrows: move | Enter: pick | Tab: search | q/Esc: quit",
    };
    frame.render_widget(
        Paragraph::new(hint).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (silent unless RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.merge_into(&mut config);

    if cli.save_config {
        config.save()?;
        eprintln!("saved {}", config::config_path().display());
        return Ok(());
    }

    let provider = build_provider(&config)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(config.tick_rate());
    let (fetch_tx, mut fetch_rx) = tokio::sync::mpsc::unbounded_channel::<FetchUpdate>();
    let (select_tx, mut select_rx) = tokio::sync::mpsc::unbounded_channel::<Gif>();

    let mut state = AppState::new(config, provider, fetch_tx, select_tx);
    match cli.search.as_deref() {
        Some(query) => {
            state.show(ActiveView::Search);
            state.query = query.to_string();
            state.submit_query();
        }
        None => state.show(ActiveView::Trending),
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── event loop ────────────────────────────────────────────
    // Fetch results are applied here, one at a time, interleaved with
    // input, never from the fetch tasks themselves.
    let loop_result: Result<()> = async {
        loop {
            terminal.draw(|frame| draw(frame, &state))?;

            tokio::select! {
                biased;

                Some(event) = events.recv() => {
                    match event {
                        AppEvent::Key(k) => handler::handle_key(&mut state, k),
                        AppEvent::Paste(text) => handler::handle_paste(&mut state, &text),
                        AppEvent::Resize(_, _) => {}
                        AppEvent::Tick => state.tick = state.tick.wrapping_add(1),
                    }
                }

                Some(gif) = select_rx.recv() => {
                    state.selected_gif = Some(gif);
                    state.should_quit = true;
                }

                Some(update) = fetch_rx.recv() => {
                    state.apply_fetch_update(update);
                }
            }

            if state.should_quit {
                return Ok(());
            }
        }
    }
    .await;

    // ── teardown ──────────────────────────────────────────────
    state.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    loop_result?;

    if let Some(gif) = &state.selected_gif {
        println!("{}", gif.url);
    }

    Ok(())
}
