//! Two independent subscriptions over one source: different transforms,
//! different scheduler shapes, concurrently active, no cross-talk.
//!
//! Run with: `cargo run --example dual_subscription`

use std::sync::Arc;
use std::time::Duration;

use ordflow::{
    CollectSink, SchedulerConfig, Source, Subscription, TransformError, TransformFn, TransformRef,
};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let source = Source::from_iter(
        ["Apple", "Orange", "Grape", "Banana", "Strawberry"].map(String::from),
    );

    let upper: TransformRef<String, String> =
        TransformFn::arc("uppercase", |item: String| async move {
            tokio::time::sleep(Duration::from_millis(80)).await;
            Ok::<_, TransformError>(item.to_uppercase())
        });
    let tag: TransformRef<String, String> = TransformFn::arc("tag", |item: String| async move {
        Ok::<_, TransformError>(format!("{item}-x"))
    });

    let upper_sink: Arc<CollectSink<String>> = Arc::new(CollectSink::new());
    let tag_sink: Arc<CollectSink<String>> = Arc::new(CollectSink::new());

    let a = Subscription::new(
        &source,
        SchedulerConfig::parallel(4),
        upper,
        upper_sink.clone(),
    )
    .start()
    .await;
    let b = Subscription::new(&source, SchedulerConfig::Single, tag, tag_sink.clone())
        .start()
        .await;

    a.join().await;
    b.join().await;

    println!("parallel uppercase: {:?}", upper_sink.values());
    println!("single tagged:      {:?}", tag_sink.values());
    Ok(())
}
