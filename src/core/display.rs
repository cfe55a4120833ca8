//! Display states and the pure outcome → state mapping.
//!
//! Nothing here touches a sink.  Controllers call [`transition`] and then
//! apply the returned state themselves.

use crate::core::gif::GifList;

/// Shown when the provider answered with zero results.
pub const NO_RESULTS_MESSAGE: &str = "No GIF found.";
/// Shown for any provider failure.
pub const FAILURE_MESSAGE: &str = "Something went wrong.";

/// What the grid area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    /// Never empty; see [`DisplayState::content`].
    Content(GifList),
    Error(String),
}

impl DisplayState {
    /// Routes an empty list to the "no results" error so `Content` always
    /// has something to show.
    pub fn content(list: GifList) -> Self {
        if list.is_empty() {
            DisplayState::Error(NO_RESULTS_MESSAGE.to_string())
        } else {
            DisplayState::Content(list)
        }
    }
}

/// Terminal result of one fetch task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(GifList),
    Failure,
    Cancelled,
}

/// Lifecycle events a controller feeds through [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Started,
    Finished(FetchOutcome),
}

/// Next display state for `event`, or `None` when nothing changes and the
/// sink must not be notified.
pub fn transition(event: FetchEvent) -> Option<DisplayState> {
    match event {
        FetchEvent::Started => Some(DisplayState::Loading),
        FetchEvent::Finished(FetchOutcome::Success(list)) => Some(DisplayState::content(list)),
        FetchEvent::Finished(FetchOutcome::Failure) => {
            Some(DisplayState::Error(FAILURE_MESSAGE.to_string()))
        }
        FetchEvent::Finished(FetchOutcome::Cancelled) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gif::Gif;

    fn gifs(n: usize) -> GifList {
        (0..n)
            .map(|i| Gif::new(format!("id{i}"), format!("gif {i}"), "p", "u"))
            .collect()
    }

    #[test]
    fn started_is_loading() {
        assert_eq!(transition(FetchEvent::Started), Some(DisplayState::Loading));
    }

    #[test]
    fn non_empty_success_is_content_with_the_same_list() {
        for n in [1, 2, 20] {
            let list = gifs(n);
            assert_eq!(
                transition(FetchEvent::Finished(FetchOutcome::Success(list.clone()))),
                Some(DisplayState::Content(list))
            );
        }
    }

    #[test]
    fn empty_success_is_no_results_error() {
        assert_eq!(
            transition(FetchEvent::Finished(FetchOutcome::Success(Vec::new()))),
            Some(DisplayState::Error("No GIF found.".into()))
        );
    }

    #[test]
    fn failure_is_generic_error() {
        assert_eq!(
            transition(FetchEvent::Finished(FetchOutcome::Failure)),
            Some(DisplayState::Error("Something went wrong.".into()))
        );
    }

    #[test]
    fn cancelled_changes_nothing() {
        assert_eq!(transition(FetchEvent::Finished(FetchOutcome::Cancelled)), None);
    }
}
