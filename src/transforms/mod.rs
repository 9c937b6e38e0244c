//! # Transform abstractions and the per-subscription stage.
//!
//! This module provides the transform-related types:
//! - [`Transform`] — trait for per-item async transforms
//! - [`TransformFn`] — function-backed implementation
//! - [`TransformRef`] — shared handle (`Arc<dyn Transform>`)
//! - `TransformStage` (internal) — wraps a transform with panic capture,
//!   tracing hooks, and completion reporting

mod stage;
mod transform;
mod transform_fn;

pub use transform::{Transform, TransformRef};
pub use transform_fn::TransformFn;

pub(crate) use stage::TransformStage;
