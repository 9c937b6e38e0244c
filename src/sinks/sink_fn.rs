//! # Closure-backed sink (`FnSink`)
//!
//! Subscribing with a lambda: [`FnSink`] calls the given closure once per
//! ordered value and leaves the terminal signals as no-ops. Pair it with
//! [`CollectSink`](crate::CollectSink) when a demo or test also needs the
//! terminal state.
//!
//! ## Example
//! ```
//! use ordflow::{FnSink, Sink, SinkRef};
//!
//! let printer: SinkRef<String> = FnSink::arc("printer", |value: String| {
//!     println!("received {value}");
//! });
//!
//! assert_eq!(printer.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use crate::sinks::sink::Sink;

/// Function-backed sink invoking a closure per ordered value.
pub struct FnSink<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> FnSink<F> {
    /// Creates a new closure-backed sink.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the sink and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, R> Sink<R> for FnSink<F>
where
    F: Fn(R) + Send + Sync + 'static,
    R: Send + 'static,
{
    async fn on_next(&self, value: R) {
        (self.f)(value);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
