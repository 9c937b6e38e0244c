//! # Simple logging sink for debugging and demos.
//!
//! [`LogSink`] prints ordered emissions and the terminal signal to stdout
//! in a human-readable format.
//!
//! ## Output format
//! ```text
//! [next] value="APPLE"
//! [complete]
//! [error] label=transform_terminal err="transform failed at position 2: ..."
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::FlowError;
use crate::sinks::sink::Sink;

/// Stdout logging sink.
///
/// Enabled via the `logging` feature. Not intended for production use —
/// implement a custom [`Sink`] for structured logging or metrics.
pub struct LogSink;

#[async_trait]
impl<R> Sink<R> for LogSink
where
    R: Debug + Send + 'static,
{
    async fn on_next(&self, value: R) {
        println!("[next] value={value:?}");
    }

    async fn on_complete(&self) {
        println!("[complete]");
    }

    async fn on_error(&self, error: FlowError) {
        println!("[error] label={} err={:?}", error.as_label(), error.to_string());
    }

    fn name(&self) -> &str {
        "log-sink"
    }
}
