//! # Sinks: ordered consumers of subscription output.
//!
//! This module provides the [`Sink`] trait and built-in implementations
//! for receiving the ordered results of a subscription.
//!
//! ## Contents
//! - [`Sink`] — the consumer capability set (`on_next` / `on_complete` / `on_error`)
//! - [`FnSink`] — closure-backed sink
//! - [`CollectSink`] — accumulating sink for demos and tests
//! - [`LogSink`] — stdout demo sink (feature `logging`)
//!
//! ## Delivery contract
//! Sinks are invoked only by the subscription's coordinator, always
//! sequentially, never concurrently with themselves, and always in
//! strictly increasing position order.

mod collect;
#[cfg(feature = "logging")]
mod log;
mod sink;
mod sink_fn;

pub use collect::{CollectSink, Terminal};
#[cfg(feature = "logging")]
pub use log::LogSink;
pub use sink::{Sink, SinkRef};
pub use sink_fn::FnSink;
