//! Error types used by the ordflow pipeline and user transforms.
//!
//! This module defines two main error enums:
//!
//! - [`TransformError`] — failures raised by a user transform for one item.
//! - [`FlowError`] — terminal subscription failures delivered to a sink.
//!
//! Both types provide `as_label` helpers for logging/metrics.

use thiserror::Error;

/// # Errors produced by a user transform for a single item.
///
/// A failed (or panicking) transform never propagates into worker
/// infrastructure; it is captured per task and travels through the
/// completion stream keyed by the item's position, so even error reporting
/// preserves emission order.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Transform returned an error for this item.
    #[error("transform failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Transform panicked while processing this item.
    #[error("transform panicked: {error}")]
    Panic {
        /// The captured panic message.
        error: String,
    },
}

impl TransformError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use ordflow::TransformError;
    ///
    /// let err = TransformError::Fail { error: "boom".into() };
    /// assert_eq!(err.as_label(), "transform_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TransformError::Fail { .. } => "transform_failed",
            TransformError::Panic { .. } => "transform_panic",
        }
    }
}

/// # Terminal subscription errors.
///
/// Delivered to [`Sink::on_error`](crate::Sink::on_error) exactly once;
/// the subscription stops permanently afterwards.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FlowError {
    /// A transform error reached the head of the emission order.
    ///
    /// Errors for positions beyond the next expected one are buffered like
    /// ordinary results and surfaced only when the drain reaches them.
    #[error("transform failed at position {position}: {source}")]
    Transform {
        /// Position of the item whose transform failed.
        position: usize,
        /// The captured transform failure.
        #[source]
        source: TransformError,
    },

    /// A completion arrived for a position that cannot be pending.
    ///
    /// Each position is submitted and completed exactly once, so this
    /// indicates a scheduler/bookkeeping bug rather than a user error. The
    /// subscription aborts loudly instead of continuing with corrupt order.
    #[error("ordering violation: completion for position {position} while expecting {next_expected}")]
    Ordering {
        /// Position carried by the offending completion.
        position: usize,
        /// Position the sequencer expected next.
        next_expected: usize,
    },
}

impl FlowError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use ordflow::FlowError;
    ///
    /// let err = FlowError::Ordering { position: 0, next_expected: 3 };
    /// assert_eq!(err.as_label(), "ordering_violation");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FlowError::Transform { .. } => "transform_terminal",
            FlowError::Ordering { .. } => "ordering_violation",
        }
    }

    /// Position the error is attached to.
    pub fn position(&self) -> usize {
        match self {
            FlowError::Transform { position, .. } => *position,
            FlowError::Ordering { position, .. } => *position,
        }
    }
}
