use super::verdict::{Verdict, WorkerStats};
use crossbeam_channel::{Receiver, Sender};
use std::{
    any::Any,
    mem,
    panic::{AssertUnwindSafe, catch_unwind},
};

/// Worker loop: validates items from `rx` and reports each verdict on `tx`.
///
/// A worker handles one item at a time. It receives an item, runs the
/// validator on it, and blocks until the coordinator takes the verdict before
/// asking for the next item.
///
/// The loop ends silently when the input channel is closed and drained; no
/// final message goes through `tx`. It also ends if the verdict channel has
/// been dropped. The returned [`WorkerStats`] are collected by the
/// coordinator when it joins the worker thread.
///
/// # Arguments
///
/// - `worker_id`: Identifier used for logs and fault attribution.
/// - `rx`: Shared input channel. Every worker holds a clone of the same
///   receiver, so each item is delivered to exactly one of them.
/// - `tx`: Shared verdict channel back to the coordinator.
/// - `validator`: Caller-supplied predicate.
pub(crate) fn worker_loop<T, F>(
    worker_id: usize,
    rx: Receiver<T>,
    tx: Sender<Verdict>,
    validator: &F,
) -> WorkerStats
where
    F: Fn(&T) -> bool + ?Sized,
{
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} started");

    let mut stats = WorkerStats::new(worker_id);

    while let Ok(item) = rx.recv() {
        let verdict = evaluate(worker_id, validator, item);
        stats.record(&verdict);

        #[cfg(feature = "tracing")]
        tracing::trace!(worker_id, ?verdict, "item validated");

        if tx.send(verdict).is_err() {
            #[cfg(feature = "tracing")]
            tracing::debug!("Worker {worker_id} lost its verdict channel");
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        "Worker {worker_id} stopped after {} items",
        stats.processed
    );

    stats
}

/// Runs the validator and drops the item, turning any panic along the way
/// into [`Verdict::Fault`] so the coordinator always gets a verdict back.
///
/// The item is consumed inside the unwind boundary because its destructor is
/// caller code too.
fn evaluate<T, F>(worker_id: usize, validator: &F, item: T) -> Verdict
where
    F: Fn(&T) -> bool + ?Sized,
{
    let outcome = catch_unwind(AssertUnwindSafe(move || {
        let valid = validator(&item);
        drop(item);
        valid
    }));

    match outcome {
        Ok(true) => Verdict::Pass,
        Ok(false) => Verdict::Fail,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            discard_payload(payload);

            #[cfg(feature = "tracing")]
            tracing::warn!("Worker {worker_id} validator panicked: {message}");

            Verdict::Fault { worker_id, message }
        }
    }
}

/// Drops a panic payload whose own destructor may panic. A payload raised by
/// that second panic is leaked rather than dropped.
fn discard_payload(payload: Box<dyn Any + Send>) {
    if let Err(nested) = catch_unwind(AssertUnwindSafe(move || drop(payload))) {
        mem::forget(nested);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "validator panicked".to_string()
    }
}
