//! # Sequencer: restores emission order from unordered completions.
//!
//! Workers finish in arbitrary order; the sequencer is the per-subscription
//! ordering authority that turns arrival order back into strict position
//! order.
//!
//! ```text
//! accept(event):
//!   position == next_expected ──► emit, then drain the contiguous run
//!                                 buffered behind it (each element
//!                                 advances next_expected by one)
//!   position >  next_expected ──► buffer in pending (out of order)
//!   position <  next_expected ──► ordering violation (fatal)
//! ```
//!
//! Draining on arrival emits each item the instant it is both computed and
//! all predecessors are out; collecting everything and sorting afterwards
//! would forfeit streaming entirely.
//!
//! ## Buffering bound
//! `pending` holds at most the number of tasks concurrently in flight
//! (the worker-pool width), never the sequence length: a completion can
//! only run ahead of `next_expected` while earlier tasks are still
//! executing.

use std::collections::BTreeMap;

use crate::error::{FlowError, TransformError};
use crate::events::CompletionEvent;

/// Per-subscription reorder state.
///
/// Owned and mutated by exactly one coordinator task; never shared across
/// subscriptions.
pub(crate) struct Sequencer<R> {
    /// Next position to emit; only ever incremented.
    next_expected: usize,
    /// Total number of positions; reaching it completes the subscription.
    total: usize,
    /// Completions that arrived before their position was due.
    pending: BTreeMap<usize, Result<R, TransformError>>,
}

impl<R> Sequencer<R> {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            next_expected: 0,
            total,
            pending: BTreeMap::new(),
        }
    }

    /// Feeds one completion into the reorder state.
    ///
    /// Returns the (possibly empty) contiguous run of outcomes that became
    /// emittable, starting at the pre-call `next_expected`. A position that
    /// was already emitted, or that lies outside `0..total`, is a fatal
    /// [`FlowError::Ordering`].
    pub(crate) fn accept(
        &mut self,
        event: CompletionEvent<R>,
    ) -> Result<Vec<Result<R, TransformError>>, FlowError> {
        if event.position < self.next_expected || event.position >= self.total {
            return Err(FlowError::Ordering {
                position: event.position,
                next_expected: self.next_expected,
            });
        }

        if event.position > self.next_expected {
            self.pending.insert(event.position, event.outcome);
            return Ok(Vec::new());
        }

        let mut run = vec![event.outcome];
        self.next_expected += 1;
        while let Some(buffered) = self.pending.remove(&self.next_expected) {
            run.push(buffered);
            self.next_expected += 1;
        }
        Ok(run)
    }

    /// True once every position was handed out by [`Sequencer::accept`].
    pub(crate) fn is_complete(&self) -> bool {
        self.next_expected == self.total
    }

    /// Next position to emit.
    pub(crate) fn next_expected(&self) -> usize {
        self.next_expected
    }

    /// Number of buffered out-of-order completions.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn buffered(&self) -> usize {
        self.pending.len()
    }
}
