use crate::config::DemoConfig;
use vetpool::{Pipeline, PipelineAsyncTokioExt, Sequence, Tally};

/// Stack of `5 + i * 7` for `i` in `0..=num_ints`, pushed in increasing order.
pub fn int_stack(num_ints: u32) -> Sequence<i64> {
    let mut stack = Sequence::lifo();
    stack.extend((0..=i64::from(num_ints)).map(|i| 5 + i * 7));
    stack
}

/// Queue of the three fixed phrases.
pub fn phrase_queue() -> Sequence<String> {
    let mut queue = Sequence::fifo();
    queue.extend(["Hello World", "Generics", "World Wide Web"].map(String::from));
    queue
}

pub fn is_even(n: &i64) -> bool {
    n % 2 == 0
}

pub fn mentions_world(s: &str) -> bool {
    s.contains("World")
}

/// Runs the integer pass, pauses, then runs the string pass.
pub async fn run(config: &DemoConfig) -> anyhow::Result<(Tally, Tally)> {
    let pipeline = Pipeline::new(config.num_workers)?.with_fault_policy(config.fault_policy);

    let ints = pipeline.run_async(int_stack(config.num_ints), is_even).await?;
    report("even integers", &ints);

    tracing::debug!("Pausing for {:?}", config.pause);
    tokio::time::sleep(config.pause).await;

    let phrases = pipeline.run_async(phrase_queue(), |s: &String| mentions_world(s)).await?;
    report("phrases mentioning \"World\"", &phrases);

    Ok((ints, phrases))
}

fn report(label: &str, tally: &Tally) {
    tracing::info!(
        passed = tally.passed,
        failed = tally.failed,
        faulted = tally.faulted,
        "{label}: {} of {} valid",
        tally.passed,
        tally.total()
    );
    for worker in &tally.workers {
        tracing::debug!(
            "worker {}: {} items, {} valid",
            worker.worker_id,
            worker.processed,
            worker.passed
        );
    }
    println!("Number of valid items: {}", tally.passed);
}
