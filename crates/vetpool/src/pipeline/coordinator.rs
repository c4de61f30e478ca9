use super::{
    FaultPolicy,
    verdict::{Tally, Verdict, WorkerStats},
    worker::worker_loop,
};
use crate::{Error, Result, Sequence};
use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, ScopedJoinHandle};

/// Drains `sequence` through a pool of `num_workers` workers and tallies the
/// verdicts.
///
/// Both channels are rendezvous channels (capacity 0): sending an item blocks
/// until an idle worker takes it, and the coordinator then blocks until one
/// verdict comes back. Only one item is ever in flight, so closing the input
/// channel once the sequence is empty can never race a pending send.
///
/// Workers run on scoped threads and are always joined before this function
/// returns, including on error paths.
///
/// # Errors
///
/// - [`Error::Spawn`] if a worker thread cannot be started.
/// - [`Error::ValidatorFault`] on the first fault under
///   [`FaultPolicy::Abort`]. Items not yet dispatched stay in `sequence`.
/// - [`Error::ChannelClosed`] if every worker is gone while items remain.
/// - [`Error::WorkerPanicked`] if a worker thread could not be joined.
pub(crate) fn coordinate<T, F>(
    num_workers: usize,
    fault_policy: FaultPolicy,
    sequence: &mut Sequence<T>,
    validator: &F,
) -> Result<Tally>
where
    T: Send,
    F: Fn(&T) -> bool + Sync,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Dispatching {} items to {num_workers} workers ({:?})",
        sequence.len(),
        sequence.discipline()
    );

    thread::scope(|s| -> Result<Tally> {
        let (item_tx, item_rx) = crossbeam_channel::bounded::<T>(0);
        let (verdict_tx, verdict_rx) = crossbeam_channel::bounded::<Verdict>(0);

        let mut handles = Vec::with_capacity(num_workers);
        for worker_id in 1..=num_workers {
            let rx = item_rx.clone();
            let tx = verdict_tx.clone();
            // On failure `item_tx` is dropped on return, which lets the
            // workers spawned so far exit before the scope joins them.
            let handle = thread::Builder::new()
                .name(format!("vetpool-worker-{worker_id}"))
                .spawn_scoped(s, move || worker_loop(worker_id, rx, tx, validator))
                .map_err(|source| Error::Spawn { worker_id, source })?;
            handles.push(handle);
        }
        drop(item_rx);
        drop(verdict_tx);

        let dispatched = dispatch(sequence, item_tx, &verdict_rx, fault_policy);
        let joined = join_workers(handles);

        let mut tally = dispatched?;
        tally.workers = joined?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Run complete: {} passed, {} failed, {} faulted",
            tally.passed,
            tally.failed,
            tally.faulted
        );

        Ok(tally)
    })
}

/// Feeds items one at a time and waits for each verdict.
///
/// Takes the item sender by value: returning from this function closes the
/// input channel, which is the shutdown signal for every worker.
fn dispatch<T>(
    sequence: &mut Sequence<T>,
    item_tx: Sender<T>,
    verdict_rx: &Receiver<Verdict>,
    fault_policy: FaultPolicy,
) -> Result<Tally> {
    let mut tally = Tally::default();

    while let Some(item) = sequence.remove_next() {
        if item_tx.send(item).is_err() {
            return Err(Error::ChannelClosed {
                context: "no worker left to receive an item".to_string(),
            });
        }

        let verdict = verdict_rx.recv().map_err(|_| Error::ChannelClosed {
            context: "verdict channel closed with an item in flight".to_string(),
        })?;
        tally.record(&verdict);

        if let Verdict::Fault { worker_id, message } = verdict {
            if fault_policy == FaultPolicy::Abort {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Aborting run after fault in worker {worker_id} ({} items left)",
                    sequence.len()
                );
                return Err(Error::ValidatorFault { worker_id, message });
            }
        }
    }

    Ok(tally)
}

fn join_workers(handles: Vec<ScopedJoinHandle<'_, WorkerStats>>) -> Result<Vec<WorkerStats>> {
    let mut stats = Vec::with_capacity(handles.len());
    let mut failed = None;

    // Join every handle even after a failure so no worker outlives the run.
    for (i, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(worker) => stats.push(worker),
            Err(_) => {
                let worker_id = i + 1;
                #[cfg(feature = "tracing")]
                tracing::error!("Worker {worker_id} could not be joined");
                failed.get_or_insert(worker_id);
            }
        }
    }

    match failed {
        Some(worker_id) => Err(Error::WorkerPanicked { worker_id }),
        None => Ok(stats),
    }
}
