//! # Transform stage: builds the worker future for one task.
//!
//! The stage wraps the user transform so that any failure inside it —
//! returned error or panic — is captured and converted into a
//! [`CompletionEvent`] carrying [`TransformError`] at the originating
//! position, never an unwound worker. It also drives the optional
//! [`Intercept`](crate::Intercept) hooks around each application.
//!
//! ```text
//! task(position, item):
//!   cancelled? ── yes ──► drop silently
//!   │
//!   ├─► before_process(position, &item)        (each interceptor)
//!   ├─► transform.apply(item)   [catch_unwind]
//!   ├─► after_process(position, &outcome)      (each interceptor)
//!   └─► events.send(CompletionEvent)           (to the coordinator)
//! ```
//!
//! One stage instance is owned by exactly one subscription.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::TransformError;
use crate::events::CompletionEvent;
use crate::observe::InterceptRef;
use crate::schedulers::WorkerFuture;
use crate::transforms::TransformRef;

/// Builds worker futures that apply the transform and report completions.
pub(crate) struct TransformStage<T, R> {
    transform: TransformRef<T, R>,
    interceptors: Arc<[InterceptRef<T, R>]>,
    events: mpsc::Sender<CompletionEvent<R>>,
    token: CancellationToken,
}

impl<T, R> TransformStage<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Creates the stage for one subscription.
    pub(crate) fn new(
        transform: TransformRef<T, R>,
        interceptors: Arc<[InterceptRef<T, R>]>,
        events: mpsc::Sender<CompletionEvent<R>>,
        token: CancellationToken,
    ) -> Self {
        Self {
            transform,
            interceptors,
            events,
            token,
        }
    }

    /// Produces the worker future for one `(position, item)` pair.
    ///
    /// Ownership of execution passes to the scheduler on submit. A task
    /// that observes cancellation before running completes without
    /// reporting.
    pub(crate) fn task(&self, position: usize, item: T) -> WorkerFuture {
        let transform = Arc::clone(&self.transform);
        let interceptors = Arc::clone(&self.interceptors);
        let events = self.events.clone();
        let token = self.token.clone();

        Box::pin(async move {
            if token.is_cancelled() {
                return;
            }
            for hook in interceptors.iter() {
                hook.before_process(position, &item);
            }

            let outcome = match AssertUnwindSafe(transform.apply(item)).catch_unwind().await {
                Ok(result) => result,
                Err(panic) => Err(TransformError::Panic {
                    error: panic_message(panic.as_ref()),
                }),
            };

            for hook in interceptors.iter() {
                hook.after_process(position, &outcome);
            }

            // Receiver gone means the subscription is already terminal;
            // the result is dropped, not surfaced.
            let _ = events.send(CompletionEvent::new(position, outcome)).await;
        })
    }
}

/// Extracts a printable message from a panic payload.
fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
