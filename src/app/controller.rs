//! Fetch controllers: one cancellable fetch at a time, mapped onto a sink.
//!
//! [`FetchController`] holds the shared lifecycle: it owns the single
//! active [`TaskHandle`], swaps it out (cancel old, start new) on every
//! start, and drops any update that does not belong to the task it still
//! holds.  [`TrendingController`] and [`SearchController`] only decide
//! *when* to start.

use std::num::NonZeroU32;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::mpsc;

use super::fetch_runtime::{spawn_fetch, FetchUpdate, TaskHandle, TaskId};
use super::sink::ResultSink;
use crate::core::display::{transition, DisplayState, FetchEvent};
use crate::core::request::{FetchRequest, RequestKind};
use crate::provider::GifProvider;

/// Where the controller's state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Loading,
    Content,
    Error,
}

pub struct FetchController<S> {
    kind: RequestKind,
    provider: Arc<dyn GifProvider>,
    updates: mpsc::UnboundedSender<FetchUpdate>,
    active: Option<TaskHandle>,
    next_task_id: TaskId,
    state: ControllerState,
    sink: S,
}

impl<S: ResultSink> FetchController<S> {
    pub fn new(
        kind: RequestKind,
        provider: Arc<dyn GifProvider>,
        updates: mpsc::UnboundedSender<FetchUpdate>,
        sink: S,
    ) -> Self {
        Self {
            kind,
            provider,
            updates,
            active: None,
            next_task_id: 1,
            state: ControllerState::Idle,
            sink,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_fetching(&self) -> bool {
        self.active.is_some()
    }

    #[cfg(test)]
    pub fn active_task(&self) -> Option<TaskId> {
        self.active.as_ref().map(TaskHandle::id)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Cancel whatever is in flight, start `request`, and show loading.
    pub fn start(&mut self, request: FetchRequest) -> TaskId {
        debug_assert_eq!(request.kind(), self.kind, "request routed to wrong controller");

        self.cancel_active();

        let task_id = self.next_task_id;
        self.next_task_id = self.next_task_id.wrapping_add(1);
        tracing::debug!(task_id, kind = %self.kind, ?request, "fetch started");

        self.active = Some(spawn_fetch(
            self.updates.clone(),
            Arc::clone(&self.provider),
            task_id,
            request,
        ));
        self.apply(FetchEvent::Started);
        task_id
    }

    /// Cancel the active task, if any, and forget it.  A controller that
    /// was loading drops back to `Idle` and the sink leaves its loading
    /// panel; an already settled display is left as it was.
    pub fn cancel(&mut self) {
        if self.cancel_active() && self.state == ControllerState::Loading {
            self.state = ControllerState::Idle;
            self.sink.on_idle();
        }
    }

    fn cancel_active(&mut self) -> bool {
        let Some(handle) = self.active.take() else {
            return false;
        };
        handle.cancel();
        tracing::debug!(task_id = handle.id(), kind = %self.kind, "fetch cancelled");
        true
    }

    /// Apply a finished task's outcome.  Returns `true` if the sink was
    /// notified; updates from superseded or cancelled tasks never are.
    pub fn handle_update(&mut self, update: FetchUpdate) -> bool {
        let is_current = self
            .active
            .as_ref()
            .is_some_and(|handle| handle.id() == update.task_id && !handle.is_cancelled());
        if update.kind != self.kind || !is_current {
            tracing::debug!(task_id = update.task_id, kind = %self.kind, "stale fetch result dropped");
            return false;
        }

        self.active = None;
        self.apply(FetchEvent::Finished(update.outcome))
    }

    fn apply(&mut self, event: FetchEvent) -> bool {
        let Some(next) = transition(event) else {
            return false;
        };
        match next {
            DisplayState::Loading => {
                self.state = ControllerState::Loading;
                self.sink.on_loading();
            }
            DisplayState::Content(gifs) => {
                self.state = ControllerState::Content;
                self.sink.on_content(gifs);
            }
            DisplayState::Error(message) => {
                self.state = ControllerState::Error;
                self.sink.on_error(&message);
            }
        }
        true
    }
}

// ───────────────────────────────────────── trending ─────────

/// Fetches trending GIFs once per activation of its view.
pub struct TrendingController<S> {
    inner: FetchController<S>,
    limit: NonZeroU32,
    activated: bool,
}

impl<S: ResultSink> TrendingController<S> {
    pub fn new(
        provider: Arc<dyn GifProvider>,
        updates: mpsc::UnboundedSender<FetchUpdate>,
        sink: S,
        limit: NonZeroU32,
    ) -> Self {
        Self {
            inner: FetchController::new(RequestKind::Trending, provider, updates, sink),
            limit,
            activated: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.activated
    }

    /// Start the trending fetch unless this activation already did.
    pub fn activate(&mut self) -> Option<TaskId> {
        if self.activated {
            return None;
        }
        self.activated = true;
        Some(self.inner.start(FetchRequest::trending(self.limit)))
    }

    /// End the activation; a failed or unfinished fetch is only retried by
    /// activating again.
    pub fn deactivate(&mut self) {
        self.activated = false;
        self.inner.cancel();
    }
}

impl<S> Deref for TrendingController<S> {
    type Target = FetchController<S>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<S> DerefMut for TrendingController<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

// ───────────────────────────────────────── search ───────────

/// Fetches results for each submitted query; a new submit supersedes the
/// one in flight.
pub struct SearchController<S> {
    inner: FetchController<S>,
    limit: NonZeroU32,
}

impl<S: ResultSink> SearchController<S> {
    pub fn new(
        provider: Arc<dyn GifProvider>,
        updates: mpsc::UnboundedSender<FetchUpdate>,
        sink: S,
        limit: NonZeroU32,
    ) -> Self {
        Self {
            inner: FetchController::new(RequestKind::Search, provider, updates, sink),
            limit,
        }
    }

    /// Submit `query`.  Empty queries are ignored; resubmitting the query
    /// already in flight restarts it.
    pub fn submit(&mut self, query: &str) -> Option<TaskId> {
        let request = FetchRequest::search(self.limit, query)?;
        Some(self.inner.start(request))
    }

    pub fn teardown(&mut self) {
        self.inner.cancel();
    }
}

impl<S> Deref for SearchController<S> {
    type Target = FetchController<S>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<S> DerefMut for SearchController<S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
