//! # ordflow
//!
//! **ordflow** delivers the results of concurrently executed transforms in
//! the original order of a finite source — never in completion order.
//!
//! It provides primitives to replay an ordered sequence, fan the per-item
//! work out to a scheduler of choice, and reconcile the out-of-order
//! completions back into sequence before the consumer sees them.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  Source (N items, replayable)
//!     │  (position, item) — independent replay per subscription
//!     ▼
//!  TransformStage ──submit──► Scheduler {Parallel(W) | Single | Immediate}
//!     │                            │
//!     │                  workers finish in ANY order
//!     │                            │ CompletionEvent(position, outcome)
//!     ▼                            ▼
//!  coordinator task ◄──── mpsc ────┘
//!     │  Sequencer: next_expected + pending buffer
//!     ▼
//!  Sink: on_next (strictly position-ordered), then exactly one of
//!        on_complete / on_error        (cancelled: neither)
//! ```
//!
//! ### Guarantees
//! - Positions delivered to a sink are strictly increasing, contiguous
//!   from 0, with no gaps and no repeats — independent of completion
//!   timing and scheduler shape.
//! - Sink calls are serialized on one coordinator task per subscription;
//!   they never run concurrently with each other.
//! - Exactly one terminal call per subscription (`on_complete` or
//!   `on_error`) — or none at all if cancelled.
//! - Subscriptions over the same source are fully independent: own
//!   reorder state, own scheduler, own cancellation, own failure domain.
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits                        |
//! |-----------------|----------------------------------------------------------|-------------------------------------------|
//! | **Sources**     | Finite ordered sequences with independent replays.       | [`Source`]                                |
//! | **Schedulers**  | Choose where per-item work runs.                         | [`SchedulerConfig`]                       |
//! | **Transforms**  | Per-item async functions with captured failures.         | [`Transform`], [`TransformFn`]            |
//! | **Sinks**       | Ordered consumers with a single terminal signal.         | [`Sink`], [`FnSink`], [`CollectSink`]     |
//! | **Tracing**     | Best-effort hooks around each transform application.     | [`Intercept`]                             |
//! | **Errors**      | Typed errors for transforms and terminal failures.       | [`TransformError`], [`FlowError`]         |
//! | **Lifecycle**   | Cancellation and absorbing terminal states.              | [`SubscriptionHandle`], [`SubscriptionState`] |
//!
//! ## Optional features
//! - `logging`: exports println-based [`LogSink`] and [`LogIntercept`]
//!   _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use ordflow::{
//!     CollectSink, SchedulerConfig, Source, Subscription, TransformError, TransformFn,
//!     TransformRef,
//! };
//!
//! #[tokio::main(flavor = "multi_thread")]
//! async fn main() {
//!     let source = Source::from_iter(["Apple", "Orange", "Grape"].map(String::from));
//!
//!     // Simulate slow work; completion timing does not affect order.
//!     let transform: TransformRef<String, String> =
//!         TransformFn::arc("uppercase", |item: String| async move {
//!             tokio::time::sleep(Duration::from_millis(10)).await;
//!             Ok::<_, TransformError>(item.to_uppercase())
//!         });
//!     let sink: Arc<CollectSink<String>> = Arc::new(CollectSink::new());
//!
//!     let handle = Subscription::new(
//!         &source,
//!         SchedulerConfig::parallel(2),
//!         transform,
//!         sink.clone(),
//!     )
//!     .start()
//!     .await;
//!     handle.join().await;
//!
//!     assert_eq!(sink.values(), vec!["APPLE", "ORANGE", "GRAPE"]);
//!     assert!(sink.is_completed());
//! }
//! ```

mod core;
mod error;
mod events;
mod observe;
mod schedulers;
mod sinks;
mod sources;
mod transforms;

// ---- Public re-exports ----

pub use self::core::{Subscription, SubscriptionHandle, SubscriptionState};
pub use error::{FlowError, TransformError};
pub use events::CompletionEvent;
pub use observe::{Intercept, InterceptRef};
pub use schedulers::SchedulerConfig;
pub use sinks::{CollectSink, FnSink, Sink, SinkRef, Terminal};
pub use sources::Source;
pub use transforms::{Transform, TransformFn, TransformRef};

// Optional: expose the simple built-in stdout observers (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observe::LogIntercept;
#[cfg(feature = "logging")]
pub use sinks::LogSink;
