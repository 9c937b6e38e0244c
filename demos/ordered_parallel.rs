//! Five fruits, a slow uppercase transform, a parallel scheduler — and the
//! output still arrives in source order.
//!
//! The per-item delay decreases with position, so the LAST item finishes
//! first; the subscription nevertheless emits strictly in source order.
//!
//! Run with: `cargo run --example ordered_parallel`

use std::time::Duration;

use ordflow::{
    FnSink, SchedulerConfig, SinkRef, Source, Subscription, TransformError, TransformFn,
    TransformRef,
};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let fruits = ["Apple", "Orange", "Grape", "Banana", "Strawberry"];
    let source = Source::from_iter(fruits.map(String::from));
    let total = source.len();

    let transform: TransformRef<String, String> =
        TransformFn::arc("slow-uppercase", move |item: String| async move {
            // Later positions sleep less, so completions arrive back to front.
            let position = fruits.iter().position(|f| *f == item).unwrap_or(0);
            let delay = ((total - position) * 100) as u64;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<_, TransformError>(item.to_uppercase())
        });

    let sink: SinkRef<String> = FnSink::arc("printer", |value: String| {
        println!("received {value}");
    });

    let handle = Subscription::new(&source, SchedulerConfig::parallel(total), transform, sink)
        .start()
        .await;

    let state = handle.join().await;
    println!("subscription finished: {}", state.as_label());
    Ok(())
}
