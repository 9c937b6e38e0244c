//! # Subscription handle: cancellation and terminal state.
//!
//! A [`SubscriptionHandle`] is returned by
//! [`Subscription::start`](crate::Subscription::start). It carries the
//! per-subscription cancellation token and a join handle onto the
//! coordinator task.
//!
//! ## Terminal states
//! [`SubscriptionState`] values are absorbing: once a subscription is
//! `Completed`, `Errored`, or `Cancelled` it never transitions again, and
//! cancelling it afterwards is a no-op.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Absorbing terminal state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// Every position was emitted and `on_complete` was delivered.
    Completed,
    /// A terminal error was delivered via `on_error`.
    Errored,
    /// The subscription was cancelled; no terminal sink call was made.
    Cancelled,
}

impl SubscriptionState {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SubscriptionState::Completed => "completed",
            SubscriptionState::Errored => "errored",
            SubscriptionState::Cancelled => "cancelled",
        }
    }
}

/// Control handle for one active subscription.
pub struct SubscriptionHandle {
    token: CancellationToken,
    coordinator: JoinHandle<SubscriptionState>,
}

impl SubscriptionHandle {
    pub(crate) fn new(
        token: CancellationToken,
        coordinator: JoinHandle<SubscriptionState>,
    ) -> Self {
        Self { token, coordinator }
    }

    /// Requests cancellation (cooperative, non-blocking).
    ///
    /// Completions arriving afterwards are discarded without emission or
    /// buffering; no terminal sink call is made; in-flight tasks are
    /// allowed to finish but their results are dropped. Calling this on an
    /// already terminal subscription is a no-op.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the subscription to reach its terminal state.
    ///
    /// A coordinator that was torn down without reporting (runtime
    /// shutdown) counts as `Cancelled`.
    pub async fn join(self) -> SubscriptionState {
        self.coordinator
            .await
            .unwrap_or(SubscriptionState::Cancelled)
    }
}
