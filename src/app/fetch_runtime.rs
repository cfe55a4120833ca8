//! Background provider calls, kept off the UI loop.
//!
//! Each fetch runs as its own tokio task and reports exactly one
//! [`FetchUpdate`] back over the channel the UI loop drains.  Cancellation
//! is cooperative: the provider call is never interrupted, but a task whose
//! flag was raised reports `Cancelled` whatever the provider answered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::display::FetchOutcome;
use crate::core::request::{FetchRequest, RequestKind};
use crate::provider::GifProvider;

/// Identity of one fetch; unique per controller.
pub type TaskId = u64;

#[derive(Debug)]
pub struct FetchUpdate {
    pub kind: RequestKind,
    pub task_id: TaskId,
    pub outcome: FetchOutcome,
}

/// Owned handle to an in-flight fetch: its identity plus the flag the
/// worker reads once, when the provider call returns.
#[derive(Debug)]
pub struct TaskHandle {
    id: TaskId,
    cancel: Arc<AtomicBool>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Raise the cancellation flag.  Calling it again is a no-op.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }
}

/// Start `request` against `provider` and return its handle.  Must be
/// called from within a tokio runtime.
pub fn spawn_fetch(
    tx: mpsc::UnboundedSender<FetchUpdate>,
    provider: Arc<dyn GifProvider>,
    task_id: TaskId,
    request: FetchRequest,
) -> TaskHandle {
    let kind = request.kind();
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    tokio::spawn(async move {
        // Inner task so a panicking provider surfaces as a join error
        // instead of silently dropping the update.
        let call = tokio::spawn(async move { provider.fetch(&request).await });
        let joined = call.await;

        let outcome = if flag.load(Ordering::Acquire) {
            FetchOutcome::Cancelled
        } else {
            match joined {
                Ok(Ok(gifs)) => FetchOutcome::Success(gifs),
                Ok(Err(err)) => {
                    tracing::warn!(task_id, %kind, "provider failed: {err}");
                    FetchOutcome::Failure
                }
                Err(err) => {
                    tracing::warn!(task_id, %kind, "provider task aborted: {err}");
                    FetchOutcome::Failure
                }
            }
        };

        // Receiver gone means the UI loop has shut down.
        let _ = tx.send(FetchUpdate {
            kind,
            task_id,
            outcome,
        });
    });

    TaskHandle {
        id: task_id,
        cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gif::{Gif, GifList};
    use crate::core::request::DEFAULT_LIMIT;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    /// Answers every call with one GIF, or an error for the query "fail",
    /// after `gate` is notified.
    struct GatedProvider {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl GifProvider for GatedProvider {
        async fn fetch_trending(&self, _limit: u32) -> Result<GifList, ProviderError> {
            self.gate.notified().await;
            Ok(vec![Gif::new("t", "trending", "p", "u")])
        }

        async fn fetch_search(&self, _limit: u32, query: &str) -> Result<GifList, ProviderError> {
            self.gate.notified().await;
            if query == "fail" {
                return Err(ProviderError::Decode("scripted".into()));
            }
            Ok(vec![Gif::new(query, query, "p", "u")])
        }
    }

    fn gated() -> (Arc<Notify>, Arc<dyn GifProvider>) {
        let gate = Arc::new(Notify::new());
        let provider = Arc::new(GatedProvider {
            gate: Arc::clone(&gate),
        });
        (gate, provider)
    }

    #[tokio::test]
    async fn reports_success_with_identity() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (gate, provider) = gated();

        let handle = spawn_fetch(tx, provider, 7, FetchRequest::trending(DEFAULT_LIMIT));
        assert_eq!(handle.id(), 7);
        gate.notify_one();

        let update = rx.recv().await.expect("update");
        assert_eq!(update.task_id, 7);
        assert_eq!(update.kind, RequestKind::Trending);
        assert!(matches!(update.outcome, FetchOutcome::Success(ref g) if g.len() == 1));
    }

    #[tokio::test]
    async fn provider_error_becomes_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (gate, provider) = gated();
        let request = FetchRequest::search(DEFAULT_LIMIT, "fail").expect("query");

        let _handle = spawn_fetch(tx, provider, 1, request);
        gate.notify_one();

        let update = rx.recv().await.expect("update");
        assert_eq!(update.outcome, FetchOutcome::Failure);
    }

    #[tokio::test]
    async fn cancelled_before_completion_reports_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (gate, provider) = gated();
        let request = FetchRequest::search(DEFAULT_LIMIT, "cat").expect("query");

        let handle = spawn_fetch(tx, provider, 3, request);
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        gate.notify_one();

        let update = rx.recv().await.expect("update");
        assert_eq!(update.task_id, 3);
        assert_eq!(update.outcome, FetchOutcome::Cancelled);
    }
}
