//! # Collecting sink for demos and tests.
//!
//! [`CollectSink`] records every ordered value plus the terminal signal
//! behind a mutex, so a test can assert the exact sequence a subscription
//! delivered.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::FlowError;
use crate::sinks::sink::Sink;

/// Terminal signal recorded by a [`CollectSink`].
#[derive(Debug)]
pub enum Terminal {
    /// `on_complete` was delivered.
    Completed,
    /// `on_error` was delivered with this error.
    Errored(FlowError),
}

/// Accumulates ordered values and the terminal signal.
///
/// Snapshot accessors never block the coordinator for long; all critical
/// sections are a push or a clone.
pub struct CollectSink<R> {
    values: Mutex<Vec<R>>,
    terminal: Mutex<Option<Terminal>>,
}

impl<R> CollectSink<R> {
    /// Creates an empty collecting sink.
    pub fn new() -> Self {
        Self {
            values: Mutex::new(Vec::new()),
            terminal: Mutex::new(None),
        }
    }

    /// Snapshot of the values received so far, in delivery order.
    pub fn values(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.values.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Number of values received so far.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    /// True if no value was received yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once `on_complete` was delivered.
    pub fn is_completed(&self) -> bool {
        self.terminal
            .lock()
            .map(|t| matches!(*t, Some(Terminal::Completed)))
            .unwrap_or(false)
    }

    /// True once `on_error` was delivered.
    pub fn is_errored(&self) -> bool {
        self.terminal
            .lock()
            .map(|t| matches!(*t, Some(Terminal::Errored(_))))
            .unwrap_or(false)
    }

    /// The terminal error rendered as text, if `on_error` was delivered.
    pub fn error(&self) -> Option<String> {
        self.terminal
            .lock()
            .ok()
            .and_then(|t| match &*t {
                Some(Terminal::Errored(e)) => Some(e.to_string()),
                _ => None,
            })
    }
}

impl<R> Default for CollectSink<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> Sink<R> for CollectSink<R>
where
    R: Send + 'static,
{
    async fn on_next(&self, value: R) {
        if let Ok(mut values) = self.values.lock() {
            values.push(value);
        }
    }

    async fn on_complete(&self) {
        if let Ok(mut terminal) = self.terminal.lock() {
            terminal.get_or_insert(Terminal::Completed);
        }
    }

    async fn on_error(&self, error: FlowError) {
        if let Ok(mut terminal) = self.terminal.lock() {
            terminal.get_or_insert(Terminal::Errored(error));
        }
    }

    fn name(&self) -> &str {
        "collect-sink"
    }
}
