//! # Observability hooks for the transform stage.
//!
//! Tracing is a side channel: hooks observe work on the worker that runs
//! it and never participate in ordering decisions.
//!
//! ## Contents
//! - [`Intercept`] — before/after hooks around each transform application
//! - [`LogIntercept`] — stdout demo tracer (feature `logging`)

mod intercept;
#[cfg(feature = "logging")]
mod log;

pub use intercept::{Intercept, InterceptRef};
#[cfg(feature = "logging")]
pub use log::LogIntercept;
