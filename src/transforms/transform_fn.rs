//! # Function-backed transform (`TransformFn`)
//!
//! [`TransformFn`] wraps a closure `F: Fn(T) -> Fut`, producing a fresh
//! future per application. There is no shared mutable state between
//! applications; if shared state is needed, move an `Arc<...>` into the
//! closure explicitly.
//!
//! ## Example
//! ```
//! use ordflow::{Transform, TransformError, TransformFn, TransformRef};
//!
//! let upper: TransformRef<String, String> =
//!     TransformFn::arc("uppercase", |item: String| async move {
//!         Ok::<_, TransformError>(item.to_uppercase())
//!     });
//!
//! assert_eq!(upper.name(), "uppercase");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransformError;
use crate::transforms::transform::Transform;

/// Function-backed transform implementation.
///
/// Wraps a closure that *creates* a new future per application.
#[derive(Debug)]
pub struct TransformFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TransformFn<F> {
    /// Creates a new function-backed transform.
    ///
    /// Prefer [`TransformFn::arc`] when you immediately need a
    /// [`TransformRef`](crate::TransformRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the transform and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut, T, R> Transform<T, R> for TransformFn<F>
where
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, TransformError>> + Send + 'static,
    T: Send + 'static,
    R: Send + 'static,
{
    async fn apply(&self, item: T) -> Result<R, TransformError> {
        (self.f)(item).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
