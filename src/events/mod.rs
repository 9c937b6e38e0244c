//! Completion-event data model.
//!
//! Workers publish one [`CompletionEvent`] per task; the per-subscription
//! coordinator consumes them over an mpsc channel and restores emission
//! order before invoking the sink.

mod completion;

pub use completion::CompletionEvent;
