//! # Tracing hooks around transform execution.
//!
//! An [`Intercept`] observes each task on the worker that executes it:
//! once before the transform runs and once with the outcome. Hooks are
//! best-effort tracing only — they run on worker context, so with a
//! parallel scheduler their call order across positions is unconstrained
//! and need not match emission order. They must not affect ordering or
//! control flow.

use std::sync::Arc;

use crate::error::TransformError;

/// Shared handle to an interceptor (`Arc<dyn Intercept>`).
pub type InterceptRef<T, R> = Arc<dyn Intercept<T, R>>;

/// Observes transform execution for tracing.
///
/// Both hooks default to no-ops; implement the ones you need. Keep them
/// cheap and non-blocking — they run inline on the worker.
pub trait Intercept<T, R>: Send + Sync + 'static {
    /// Called on the worker immediately before the transform runs.
    fn before_process(&self, position: usize, item: &T) {
        let _ = (position, item);
    }

    /// Called on the worker with the outcome of the transform.
    fn after_process(&self, position: usize, outcome: &Result<R, TransformError>) {
        let _ = (position, outcome);
    }

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
