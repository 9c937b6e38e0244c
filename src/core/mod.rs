//! Subscription core: ordering authority and lifecycle.
//!
//! The public API from this module is the subscription surface:
//! [`Subscription`], [`SubscriptionHandle`], [`SubscriptionState`].
//!
//! Internal modules:
//! - `sequencer`: reorders unordered completions into strict position order;
//! - `subscription`: wires source → stage → dispatcher → coordinator → sink;
//! - `handle`: cancellation and terminal-state reporting.

mod handle;
mod sequencer;
mod subscription;

pub use handle::{SubscriptionHandle, SubscriptionState};
pub use subscription::Subscription;
