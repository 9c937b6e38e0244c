//! # Core sink trait.
//!
//! A [`Sink`] is the consumer-visible end of a subscription. It is invoked
//! only by the subscription's coordinator, always sequentially, never
//! concurrently with itself:
//!
//! - [`Sink::on_next`] once per item, in strictly increasing position order;
//! - then exactly one terminal call — [`Sink::on_complete`] after the last
//!   item, **or** [`Sink::on_error`] — never both, never more than once.
//!
//! A cancelled subscription makes no terminal call at all.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FlowError;

/// Shared handle to a sink (`Arc<dyn Sink>`).
pub type SinkRef<R> = Arc<dyn Sink<R>>;

/// Ordered consumer of subscription results.
///
/// Implementations may be slow; a slow sink delays emission of later
/// positions but never corrupts order. `on_complete` and `on_error`
/// default to no-ops.
#[async_trait]
pub trait Sink<R>: Send + Sync + 'static {
    /// Receives the result for the next position in order.
    async fn on_next(&self, value: R);

    /// Receives the single completion signal after all items were emitted.
    async fn on_complete(&self) {}

    /// Receives the single terminal error; no further calls follow.
    async fn on_error(&self, error: FlowError) {
        let _ = error;
    }

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
