//! # Completion events produced by workers.
//!
//! A [`CompletionEvent`] is the unit that flows from a worker back to the
//! subscription's coordinator: the original position plus the transform
//! outcome for that item. Across one subscription, arrival order is
//! **unordered** relative to position — reconciling that is the
//! coordinator's job, never the worker's.

use crate::error::TransformError;

/// Outcome of one task, tagged with its original position.
#[derive(Debug, Clone)]
pub struct CompletionEvent<R> {
    /// Zero-based position assigned at replay time.
    pub position: usize,
    /// Transform result or captured failure for this item.
    pub outcome: Result<R, TransformError>,
}

impl<R> CompletionEvent<R> {
    /// Creates a completion event for the given position.
    pub fn new(position: usize, outcome: Result<R, TransformError>) -> Self {
        Self { position, outcome }
    }

    /// True if this completion carries a transform failure.
    pub fn is_err(&self) -> bool {
        self.outcome.is_err()
    }
}
