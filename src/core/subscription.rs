//! # Subscription: binds one source replay, scheduler, transform, and sink.
//!
//! One subscription owns one source replay, one dispatcher, one transform
//! stage, one sequencer, and one sink. Subscriptions over the same source
//! proceed fully independently: separate reorder state, separate
//! cancellation, separate failure domains, possibly different scheduler
//! shapes.
//!
//! ## Wiring
//! ```text
//! Source ──replay──► TransformStage ──submit──► Dispatcher (workers)
//!                                                   │
//!                                        CompletionEvent (any order)
//!                                                   ▼
//!                        coordinator task ──► Sequencer ──► Sink (in order)
//! ```
//!
//! The coordinator task is the single exclusive-access point for ordering
//! state: it alone mutates the sequencer and invokes the sink, so sink
//! calls are serialized and strictly position-ordered even though
//! transform execution is parallel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::handle::{SubscriptionHandle, SubscriptionState};
use crate::core::sequencer::Sequencer;
use crate::error::FlowError;
use crate::events::CompletionEvent;
use crate::observe::InterceptRef;
use crate::schedulers::{Dispatcher, SchedulerConfig};
use crate::sinks::SinkRef;
use crate::sources::Source;
use crate::transforms::{TransformRef, TransformStage};

/// One consumer's pass over a source: transform + scheduler + sink.
pub struct Subscription<T, R> {
    source: Source<T>,
    scheduler: SchedulerConfig,
    transform: TransformRef<T, R>,
    sink: SinkRef<R>,
    interceptors: Vec<InterceptRef<T, R>>,
}

impl<T, R> Subscription<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    /// Creates a subscription over the given source.
    pub fn new(
        source: &Source<T>,
        scheduler: SchedulerConfig,
        transform: TransformRef<T, R>,
        sink: SinkRef<R>,
    ) -> Self {
        Self {
            source: source.clone(),
            scheduler,
            transform,
            sink,
            interceptors: Vec::new(),
        }
    }

    /// Attaches a tracing interceptor (may be called multiple times).
    #[must_use]
    pub fn with_intercept(mut self, interceptor: InterceptRef<T, R>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Activates the subscription and returns its control handle.
    ///
    /// All tasks are submitted to the scheduler in position order — that
    /// constrains submission only, not execution or completion order. With
    /// [`SchedulerConfig::Immediate`] the transforms run inline before
    /// this method returns; the other shapes return as soon as everything
    /// is queued.
    pub async fn start(self) -> SubscriptionHandle {
        let total = self.source.len();
        let token = CancellationToken::new();
        let (events_tx, events_rx) = mpsc::channel(total.max(1));

        let stage = TransformStage::new(
            self.transform,
            self.interceptors.into(),
            events_tx,
            token.clone(),
        );
        let dispatcher = Dispatcher::new(self.scheduler, total);
        let sequencer = Sequencer::new(total);

        let coordinator =
            tokio::spawn(coordinate(events_rx, sequencer, self.sink, token.clone()));

        for (position, item) in self.source.replay() {
            dispatcher.submit(stage.task(position, item)).await;
        }

        SubscriptionHandle::new(token, coordinator)
    }
}

/// Drives one subscription's ordering loop until a terminal state.
///
/// This is the exclusive-access point for ordering state: completions from
/// any worker funnel through `events`, and every sequencer mutation and
/// sink invocation happens here, on one task.
async fn coordinate<R: Send + 'static>(
    mut events: mpsc::Receiver<CompletionEvent<R>>,
    mut sequencer: Sequencer<R>,
    sink: SinkRef<R>,
    token: CancellationToken,
) -> SubscriptionState {
    // An empty source completes without waiting for any worker.
    if sequencer.is_complete() {
        sink.on_complete().await;
        return SubscriptionState::Completed;
    }

    loop {
        tokio::select! {
            biased;

            _ = token.cancelled() => {
                return SubscriptionState::Cancelled;
            }
            event = events.recv() => {
                let Some(event) = event else {
                    // Senders only vanish before completion when their
                    // tasks observed cancellation.
                    return SubscriptionState::Cancelled;
                };
                match sequencer.accept(event) {
                    Ok(run) => {
                        let base = sequencer.next_expected() - run.len();
                        for (offset, outcome) in run.into_iter().enumerate() {
                            match outcome {
                                Ok(value) => sink.on_next(value).await,
                                Err(source) => {
                                    sink.on_error(FlowError::Transform {
                                        position: base + offset,
                                        source,
                                    })
                                    .await;
                                    return SubscriptionState::Errored;
                                }
                            }
                        }
                        if sequencer.is_complete() {
                            sink.on_complete().await;
                            return SubscriptionState::Completed;
                        }
                    }
                    Err(violation) => {
                        sink.on_error(violation).await;
                        return SubscriptionState::Errored;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time;

    use super::*;
    use crate::error::TransformError;
    use crate::observe::Intercept;
    use crate::sinks::Sink;
    use crate::transforms::TransformFn;

    const FRUITS: [&str; 5] = ["Apple", "Orange", "Grape", "Banana", "Strawberry"];

    /// Records every sink invocation so tests can assert exact call counts.
    #[derive(Default)]
    struct ProbeSink {
        values: Mutex<Vec<String>>,
        nexts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        last_error: Mutex<Option<String>>,
    }

    impl ProbeSink {
        fn arc() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn values(&self) -> Vec<String> {
            self.values.lock().expect("probe lock").clone()
        }

        fn counts(&self) -> (usize, usize, usize) {
            (
                self.nexts.load(Ordering::SeqCst),
                self.completes.load(Ordering::SeqCst),
                self.errors.load(Ordering::SeqCst),
            )
        }

        fn last_error(&self) -> Option<String> {
            self.last_error.lock().expect("probe lock").clone()
        }
    }

    #[async_trait]
    impl Sink<String> for ProbeSink {
        async fn on_next(&self, value: String) {
            self.nexts.fetch_add(1, Ordering::SeqCst);
            self.values.lock().expect("probe lock").push(value);
        }

        async fn on_complete(&self) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        async fn on_error(&self, error: FlowError) {
            self.errors.fetch_add(1, Ordering::SeqCst);
            *self.last_error.lock().expect("probe lock") = Some(error.to_string());
        }
    }

    /// Counts interceptor invocations from worker context.
    #[derive(Default)]
    struct ProbeIntercept {
        befores: AtomicUsize,
        afters: AtomicUsize,
    }

    impl Intercept<String, String> for ProbeIntercept {
        fn before_process(&self, _position: usize, _item: &String) {
            self.befores.fetch_add(1, Ordering::SeqCst);
        }

        fn after_process(&self, _position: usize, _outcome: &Result<String, TransformError>) {
            self.afters.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn fruit_source() -> Source<String> {
        Source::from_iter(FRUITS.map(String::from))
    }

    fn expected_upper() -> Vec<String> {
        FRUITS.iter().map(|f| f.to_uppercase()).collect()
    }

    /// Uppercase with a delay that shrinks with position, so the LAST item
    /// finishes first under a parallel scheduler.
    fn decreasing_delay_uppercase() -> TransformRef<String, String> {
        TransformFn::arc("slow-uppercase", |item: String| async move {
            let position = FRUITS.iter().position(|f| *f == item).unwrap_or(0);
            let delay = ((FRUITS.len() - position) * 40) as u64;
            time::sleep(Duration::from_millis(delay)).await;
            Ok::<_, TransformError>(item.to_uppercase())
        })
    }

    /// Uppercase that fails on "Grape" (position 2) while positions behind
    /// it are still in flight.
    fn fail_on_grape() -> TransformRef<String, String> {
        TransformFn::arc("fail-on-grape", |item: String| async move {
            match item.as_str() {
                "Grape" => Err(TransformError::Fail {
                    error: "sour".into(),
                }),
                "Apple" => {
                    time::sleep(Duration::from_millis(120)).await;
                    Ok(item.to_uppercase())
                }
                "Orange" => {
                    time::sleep(Duration::from_millis(160)).await;
                    Ok(item.to_uppercase())
                }
                _ => {
                    time::sleep(Duration::from_millis(20)).await;
                    Ok(item.to_uppercase())
                }
            }
        })
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_completions_emit_in_source_order() {
        let sink = ProbeSink::arc();
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::parallel(FRUITS.len()),
            decreasing_delay_uppercase(),
            sink.clone(),
        )
        .start()
        .await;

        assert_eq!(handle.join().await, SubscriptionState::Completed);
        assert_eq!(sink.values(), expected_upper());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_exactly_once_completion() {
        let sink = ProbeSink::arc();
        let transform: TransformRef<String, String> = TransformFn::arc("uppercase", |item: String| async move {
            Ok::<_, TransformError>(item.to_uppercase())
        });
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::parallel(4),
            transform,
            sink.clone(),
        )
        .start()
        .await;

        assert_eq!(handle.join().await, SubscriptionState::Completed);
        assert_eq!(sink.counts(), (FRUITS.len(), 1, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_subscriptions_on_one_source_are_independent() {
        let source = fruit_source();

        // Subscription A errors mid-sequence on a parallel scheduler.
        let failing = ProbeSink::arc();
        let a = Subscription::new(
            &source,
            SchedulerConfig::parallel(FRUITS.len()),
            fail_on_grape(),
            failing.clone(),
        )
        .start()
        .await;

        // Subscription B tags every item on a single worker.
        let tagged = ProbeSink::arc();
        let tag: TransformRef<String, String> = TransformFn::arc("tag", |item: String| async move {
            Ok::<_, TransformError>(format!("{item}-x"))
        });
        let b = Subscription::new(&source, SchedulerConfig::Single, tag, tagged.clone())
            .start()
            .await;

        assert_eq!(a.join().await, SubscriptionState::Errored);
        assert_eq!(b.join().await, SubscriptionState::Completed);

        // A stopped at the failure; B is untouched by A's error or timing.
        assert_eq!(failing.values(), vec!["APPLE", "ORANGE"]);
        let expected_tagged: Vec<String> = FRUITS.iter().map(|f| format!("{f}-x")).collect();
        assert_eq!(tagged.values(), expected_tagged);
        assert_eq!(tagged.counts(), (FRUITS.len(), 1, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_error_terminates_in_position_order() {
        let sink = ProbeSink::arc();
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::parallel(FRUITS.len()),
            fail_on_grape(),
            sink.clone(),
        )
        .start()
        .await;

        assert_eq!(handle.join().await, SubscriptionState::Errored);

        // Positions 0 and 1 were emitted in order, then the buffered error
        // for position 2 surfaced; 3 and 4 completed first but are never
        // emitted.
        assert_eq!(sink.values(), vec!["APPLE", "ORANGE"]);
        assert_eq!(sink.counts(), (2, 0, 1));
        let message = sink.last_error().expect("terminal error");
        assert!(message.contains("position 2"), "unexpected error: {message}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_panic_is_captured_as_transform_error() {
        let sink = ProbeSink::arc();
        let transform: TransformRef<String, String> = TransformFn::arc("panicky", |item: String| async move {
            if item == "Banana" {
                panic!("slipped");
            }
            Ok::<_, TransformError>(item.to_uppercase())
        });
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::Single,
            transform,
            sink.clone(),
        )
        .start()
        .await;

        assert_eq!(handle.join().await, SubscriptionState::Errored);
        assert_eq!(sink.values(), vec!["APPLE", "ORANGE", "GRAPE"]);
        let message = sink.last_error().expect("terminal error");
        assert!(message.contains("panicked"), "unexpected error: {message}");
        assert!(message.contains("slipped"), "unexpected error: {message}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cancellation_drops_results_and_terminal_signal() {
        let sink = ProbeSink::arc();
        let transform: TransformRef<String, String> = TransformFn::arc("slow", |item: String| async move {
            time::sleep(Duration::from_millis(400)).await;
            Ok::<_, TransformError>(item)
        });
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::parallel(FRUITS.len()),
            transform,
            sink.clone(),
        )
        .start()
        .await;

        handle.cancel();
        assert_eq!(handle.join().await, SubscriptionState::Cancelled);

        // Let the in-flight tasks finish; their results must be dropped.
        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(sink.counts(), (0, 0, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cancel_after_completion_is_noop() {
        let sink = ProbeSink::arc();
        let transform: TransformRef<String, String> = TransformFn::arc("uppercase", |item: String| async move {
            Ok::<_, TransformError>(item.to_uppercase())
        });
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::Immediate,
            transform,
            sink.clone(),
        )
        .start()
        .await;

        // Wait for the terminal signal before cancelling.
        for _ in 0..200 {
            if sink.counts().1 == 1 {
                break;
            }
            time::sleep(Duration::from_millis(5)).await;
        }
        handle.cancel();

        assert_eq!(handle.join().await, SubscriptionState::Completed);
        assert_eq!(sink.counts(), (FRUITS.len(), 1, 0));
    }

    #[tokio::test]
    async fn test_immediate_scheduler_is_deterministic() {
        let sink = ProbeSink::arc();
        let transform: TransformRef<String, String> = TransformFn::arc("uppercase", |item: String| async move {
            Ok::<_, TransformError>(item.to_uppercase())
        });
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::Immediate,
            transform,
            sink.clone(),
        )
        .start()
        .await;

        assert_eq!(handle.join().await, SubscriptionState::Completed);
        assert_eq!(sink.values(), expected_upper());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_single_scheduler_preserves_order() {
        let sink = ProbeSink::arc();
        let transform: TransformRef<String, String> = TransformFn::arc("slow-uppercase", |item: String| async move {
            time::sleep(Duration::from_millis(10)).await;
            Ok::<_, TransformError>(item.to_uppercase())
        });
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::Single,
            transform,
            sink.clone(),
        )
        .start()
        .await;

        assert_eq!(handle.join().await, SubscriptionState::Completed);
        assert_eq!(sink.values(), expected_upper());
    }

    #[tokio::test]
    async fn test_empty_source_completes_immediately() {
        let sink = ProbeSink::arc();
        let source: Source<String> = Source::from_iter([]);
        let transform: TransformRef<String, String> = TransformFn::arc("noop", |item: String| async move {
            Ok::<_, TransformError>(item)
        });
        let handle = Subscription::new(&source, SchedulerConfig::parallel(2), transform, sink.clone())
            .start()
            .await;

        assert_eq!(handle.join().await, SubscriptionState::Completed);
        assert_eq!(sink.counts(), (0, 1, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_interceptors_observe_every_task_without_affecting_order() {
        let sink = ProbeSink::arc();
        let probe = Arc::new(ProbeIntercept::default());
        let handle = Subscription::new(
            &fruit_source(),
            SchedulerConfig::parallel(FRUITS.len()),
            decreasing_delay_uppercase(),
            sink.clone(),
        )
        .with_intercept(probe.clone())
        .start()
        .await;

        assert_eq!(handle.join().await, SubscriptionState::Completed);
        assert_eq!(sink.values(), expected_upper());
        assert_eq!(probe.befores.load(Ordering::SeqCst), FRUITS.len());
        assert_eq!(probe.afters.load(Ordering::SeqCst), FRUITS.len());
    }
}
