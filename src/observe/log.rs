//! # Simple logging interceptor for debugging and demos.
//!
//! [`LogIntercept`] prints every task transition to stdout in a
//! human-readable format — the per-item trace the demos enable.
//!
//! ## Output format
//! ```text
//! [process] pos=2 item="Grape"
//! [done] pos=2 label=ok
//! [done] pos=4 label=transform_failed
//! ```

use std::fmt::Debug;

use crate::error::TransformError;
use crate::observe::Intercept;

/// Stdout tracing interceptor.
///
/// Enabled via the `logging` feature. Prints one line per hook invocation
/// for debugging and demonstration purposes — implement a custom
/// [`Intercept`] for structured tracing or metrics.
pub struct LogIntercept;

impl<T, R> Intercept<T, R> for LogIntercept
where
    T: Debug,
{
    fn before_process(&self, position: usize, item: &T) {
        println!("[process] pos={position} item={item:?}");
    }

    fn after_process(&self, position: usize, outcome: &Result<R, TransformError>) {
        match outcome {
            Ok(_) => println!("[done] pos={position} label=ok"),
            Err(e) => println!("[done] pos={position} label={}", e.as_label()),
        }
    }

    fn name(&self) -> &str {
        "log-intercept"
    }
}
