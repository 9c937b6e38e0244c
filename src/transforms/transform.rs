//! # Transform abstraction.
//!
//! A [`Transform`] turns one source item into one result, asynchronously
//! and possibly slowly. Implementations may suspend for arbitrary
//! wall-clock time (I/O, timers, simulated latency); ordered delivery
//! downstream does not depend on how long any single application takes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransformError;

/// Shared handle to a transform (`Arc<dyn Transform>`).
pub type TransformRef<T, R> = Arc<dyn Transform<T, R>>;

/// # Per-item asynchronous transform.
///
/// Applied once per `(position, item)` pair of a subscription. A failure is
/// returned as [`TransformError`]; a panic inside `apply` is captured by
/// the stage and converted to [`TransformError::Panic`], so neither ever
/// propagates into worker infrastructure.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use ordflow::{Transform, TransformError};
///
/// struct Upper;
///
/// #[async_trait]
/// impl Transform<String, String> for Upper {
///     async fn apply(&self, item: String) -> Result<String, TransformError> {
///         Ok(item.to_uppercase())
///     }
/// }
/// ```
#[async_trait]
pub trait Transform<T, R>: Send + Sync + 'static {
    /// Transforms one item into one result.
    async fn apply(&self, item: T) -> Result<R, TransformError>;

    /// Human-readable name (for logs/tracing).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
