//! Input handling — maps key events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{ActiveView, AppState, SearchFocus};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => {
            state.should_quit = true;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match state.active_view {
                ActiveView::Trending => ActiveView::Search,
                ActiveView::Search => ActiveView::Trending,
            };
            state.show(next);
            return;
        }
        _ => {}
    }

    match (state.active_view, state.search_focus) {
        (ActiveView::Search, SearchFocus::Input) => handle_input_key(state, key),
        _ => handle_grid_key(state, key),
    }
}

/// Append pasted text to the search box (newlines dropped).
pub fn handle_paste(state: &mut AppState, text: &str) {
    if state.active_view != ActiveView::Search {
        return;
    }
    state.search_focus = SearchFocus::Input;
    state
        .query
        .extend(text.chars().filter(|c| !c.is_control()));
}

// ── Search box ──────────────────────────────────────────────────

fn handle_input_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => state.submit_query(),
        KeyCode::Backspace => {
            state.query.pop();
        }
        KeyCode::Down => state.search_focus = SearchFocus::Grid,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.query.push(c);
        }
        _ => {}
    }
}

// ── Grid ────────────────────────────────────────────────────────

fn handle_grid_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => state.grid_mut().move_left(),
        KeyCode::Right | KeyCode::Char('l') => state.grid_mut().move_right(),
        KeyCode::Down | KeyCode::Char('j') => {
            state.grid_mut().move_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let leave_grid = state.active_view == ActiveView::Search && state.grid().on_top_row();
            if leave_grid {
                state.search_focus = SearchFocus::Input;
            } else {
                state.grid_mut().move_up();
            }
        }
        KeyCode::Char('/') if state.active_view == ActiveView::Search => {
            state.search_focus = SearchFocus::Input;
        }
        KeyCode::Enter => {
            if let Some(gif) = state.grid_mut().select_highlighted() {
                tracing::debug!(id = %gif.id, "gif selected");
            }
        }
        KeyCode::Char('q') => state.should_quit = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::controller::ControllerState;
    use crate::app::sink::GridStatus;
    use crate::config::AppConfig;
    use crate::core::gif::{Gif, GifList};
    use crate::provider::{GifProvider, ProviderError};
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Answers instantly: trending has four GIFs, search echoes the query
    /// unless it is "none".
    struct InstantProvider;

    #[async_trait]
    impl GifProvider for InstantProvider {
        async fn fetch_trending(&self, limit: u32) -> Result<GifList, ProviderError> {
            Ok((0..limit.min(4))
                .map(|i| Gif::new(format!("t{i}"), format!("trend {i}"), "p", format!("u{i}")))
                .collect())
        }

        async fn fetch_search(&self, _limit: u32, query: &str) -> Result<GifList, ProviderError> {
            if query == "none" {
                return Ok(Vec::new());
            }
            Ok(vec![Gif::new(query, query, "p", format!("https://u/{query}"))])
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(state, press(KeyCode::Char(c)));
        }
    }

    struct App {
        state: AppState,
        updates: mpsc::UnboundedReceiver<crate::app::fetch_runtime::FetchUpdate>,
        selections: mpsc::UnboundedReceiver<Gif>,
    }

    impl App {
        fn new() -> Self {
            let (update_tx, updates) = mpsc::unbounded_channel();
            let (select_tx, selections) = mpsc::unbounded_channel();
            let state = AppState::new(
                AppConfig::default(),
                Arc::new(InstantProvider),
                update_tx,
                select_tx,
            );
            Self {
                state,
                updates,
                selections,
            }
        }

        async fn settle(&mut self) {
            let update = self.updates.recv().await.expect("update");
            self.state.apply_fetch_update(update);
        }
    }

    #[tokio::test]
    async fn trending_view_loads_on_first_show() {
        let mut app = App::new();
        app.state.show(ActiveView::Trending);
        assert_eq!(app.state.grid().status(), &GridStatus::Loading);

        app.settle().await;
        assert_eq!(app.state.grid().status(), &GridStatus::Content);
        assert_eq!(app.state.grid().gifs().len(), 4);

        // Showing the same view again is not a new activation.
        app.state.show(ActiveView::Trending);
        assert!(!app.state.trending.is_fetching());
    }

    #[tokio::test]
    async fn typing_and_enter_submits_search() {
        let mut app = App::new();
        handle_key(&mut app.state, press(KeyCode::Tab));
        assert_eq!(app.state.active_view, ActiveView::Search);
        assert!(!app.state.trending.is_active());

        // Empty submit does nothing.
        handle_key(&mut app.state, press(KeyCode::Enter));
        assert_eq!(app.state.grid().status(), &GridStatus::Empty);

        type_text(&mut app.state, "cats");
        handle_key(&mut app.state, press(KeyCode::Backspace));
        assert_eq!(app.state.query, "cat");
        handle_key(&mut app.state, press(KeyCode::Enter));
        assert_eq!(app.state.search_focus, SearchFocus::Grid);

        app.settle().await;
        assert_eq!(app.state.grid().gifs()[0].id, "cat");
    }

    #[tokio::test]
    async fn leaving_search_mid_fetch_does_not_strand_the_spinner() {
        let mut app = App::new();
        app.state.show(ActiveView::Search);
        type_text(&mut app.state, "cat");
        handle_key(&mut app.state, press(KeyCode::Enter));
        assert_eq!(app.state.grid().status(), &GridStatus::Loading);

        // Away to trending and straight back, both fetches still in flight.
        handle_key(&mut app.state, press(KeyCode::Tab));
        handle_key(&mut app.state, press(KeyCode::Tab));
        assert_eq!(app.state.active_view, ActiveView::Search);
        for _ in 0..2 {
            let update = app.updates.recv().await.expect("update");
            assert!(!app.state.apply_fetch_update(update));
        }

        assert_eq!(app.state.grid().status(), &GridStatus::Empty);
        assert!(!app.state.search.is_fetching());
        assert_eq!(app.state.search.state(), ControllerState::Idle);
        assert_eq!(app.state.trending.state(), ControllerState::Idle);

        // Re-entry: the same query can be submitted again.
        handle_key(&mut app.state, press(KeyCode::Enter));
        app.settle().await;
        assert_eq!(app.state.grid().status(), &GridStatus::Content);
        assert_eq!(app.state.grid().gifs()[0].id, "cat");
    }

    #[tokio::test]
    async fn leaving_search_mid_fetch_keeps_earlier_results() {
        let mut app = App::new();
        app.state.show(ActiveView::Search);
        type_text(&mut app.state, "dog");
        handle_key(&mut app.state, press(KeyCode::Enter));
        app.settle().await;

        handle_key(&mut app.state, press(KeyCode::Char('/')));
        type_text(&mut app.state, "s");
        handle_key(&mut app.state, press(KeyCode::Enter));
        handle_key(&mut app.state, press(KeyCode::Tab));
        handle_key(&mut app.state, press(KeyCode::Tab));
        for _ in 0..2 {
            let update = app.updates.recv().await.expect("update");
            app.state.apply_fetch_update(update);
        }

        assert_eq!(app.state.grid().status(), &GridStatus::Content);
        assert_eq!(app.state.grid().shown_count(), 1);
        assert_eq!(app.state.grid().gifs()[0].id, "dog");
    }

    #[tokio::test]
    async fn enter_on_grid_forwards_selection() {
        let mut app = App::new();
        app.state.show(ActiveView::Trending);
        app.settle().await;

        handle_key(&mut app.state, press(KeyCode::Right));
        handle_key(&mut app.state, press(KeyCode::Down));
        handle_key(&mut app.state, press(KeyCode::Enter));

        let picked = app.selections.try_recv().expect("selection forwarded");
        assert_eq!(picked.id, "t3");
    }

    #[tokio::test]
    async fn empty_search_result_shows_message() {
        let mut app = App::new();
        app.state.show(ActiveView::Search);
        type_text(&mut app.state, "none");
        handle_key(&mut app.state, press(KeyCode::Enter));
        app.settle().await;

        assert_eq!(
            app.state.grid().status(),
            &GridStatus::Error("No GIF found.".into())
        );
        // Nothing to pick.
        handle_key(&mut app.state, press(KeyCode::Enter));
        assert!(app.selections.try_recv().is_err());
    }

    #[tokio::test]
    async fn up_from_top_row_returns_to_search_box() {
        let mut app = App::new();
        app.state.show(ActiveView::Search);
        type_text(&mut app.state, "wave");
        handle_key(&mut app.state, press(KeyCode::Enter));
        app.settle().await;

        handle_key(&mut app.state, press(KeyCode::Up));
        assert_eq!(app.state.search_focus, SearchFocus::Input);
        // 'q' is text while typing.
        type_text(&mut app.state, "q");
        assert!(!app.state.should_quit);
        assert_eq!(app.state.query, "waveq");
    }

    #[tokio::test]
    async fn paste_lands_in_search_box() {
        let mut app = App::new();
        app.state.show(ActiveView::Search);
        handle_paste(&mut app.state, "happy\ndance");
        assert_eq!(app.state.query, "happydance");
    }

    #[tokio::test]
    async fn esc_and_ctrl_c_quit() {
        let mut app = App::new();
        handle_key(&mut app.state, press(KeyCode::Esc));
        assert!(app.state.should_quit);

        let mut app = App::new();
        handle_key(
            &mut app.state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.state.should_quit);
    }
}
