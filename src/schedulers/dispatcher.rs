//! # Dispatcher: submits worker futures according to a [`SchedulerConfig`].
//!
//! One dispatcher is built per subscription, so concurrently active
//! subscriptions never contend for workers:
//!
//! ```text
//!  submit(task)
//!      │
//!      ├─ Parallel(W) ──► tokio::spawn ──► acquire permit (of W) ──► task
//!      ├─ Single ───────► [queue] ──► dedicated worker ──► task (FIFO)
//!      └─ Immediate ────► task (inline, same context)
//! ```
//!
//! Submission never blocks the caller for `Parallel` and `Single`; the only
//! suspension point is inside a worker while the transform itself runs.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{Semaphore, mpsc};

use crate::schedulers::SchedulerConfig;

/// Boxed unit of work; ownership passes to the scheduler on submit.
pub(crate) type WorkerFuture = BoxFuture<'static, ()>;

/// Per-subscription executor for worker futures.
pub(crate) struct Dispatcher {
    inner: Inner,
}

enum Inner {
    /// Concurrency capped by a semaphore of `workers` permits.
    Parallel { permits: Arc<Semaphore> },
    /// FIFO queue drained by one dedicated worker task.
    Single { queue: mpsc::Sender<WorkerFuture> },
    /// Run inline on the submitting context.
    Immediate,
}

impl Dispatcher {
    /// Builds a dispatcher for the given shape.
    ///
    /// `capacity` bounds the `Single` queue; the subscription passes the
    /// source length, so submission never waits on queue space.
    pub(crate) fn new(config: SchedulerConfig, capacity: usize) -> Self {
        let inner = match config {
            SchedulerConfig::Parallel { workers } => Inner::Parallel {
                permits: Arc::new(Semaphore::new(workers.max(1))),
            },
            SchedulerConfig::Single => {
                let (tx, mut rx) = mpsc::channel::<WorkerFuture>(capacity.max(1));
                tokio::spawn(async move {
                    while let Some(task) = rx.recv().await {
                        task.await;
                    }
                });
                Inner::Single { queue: tx }
            }
            SchedulerConfig::Immediate => Inner::Immediate,
        };
        Self { inner }
    }

    /// Hands one task to the scheduler.
    ///
    /// `Parallel` and `Single` return as soon as the task is spawned or
    /// queued; `Immediate` drives the task to completion before returning.
    pub(crate) async fn submit(&self, task: WorkerFuture) {
        match &self.inner {
            Inner::Parallel { permits } => {
                let permits = Arc::clone(permits);
                tokio::spawn(async move {
                    match permits.acquire_owned().await {
                        Ok(_permit) => task.await,
                        Err(_closed) => {}
                    }
                });
            }
            Inner::Single { queue } => {
                let _ = queue.send(task).await;
            }
            Inner::Immediate => task.await,
        }
    }
}
