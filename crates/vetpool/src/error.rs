//! Error types for a pipeline run.
//!
//! Querying an empty [`Sequence`](crate::Sequence) is not represented here:
//! that is a normal outcome reported as `None`.
//!
//! ## Error Cases
//! - `InvalidWorkerCount`: a pipeline was configured with zero workers.
//! - `Spawn`: the OS refused to start a worker thread.
//! - `ChannelClosed`: every worker disappeared while items were still being
//!   dispatched.
//! - `ValidatorFault`: the validator panicked and the pipeline was configured
//!   to abort on faults.
//! - `WorkerPanicked`: a worker thread died outside of the validator call.
//! - `Join`: the async runtime failed to drive a pass to completion.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for pipeline runs.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The worker count must be at least 1.
    #[error("Invalid worker count: {0} (must be greater than 0)")]
    InvalidWorkerCount(usize),

    /// A worker thread could not be spawned.
    #[error("Failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    /// Internal channel send/receive failure.
    #[error("Channel error: {context}")]
    ChannelClosed { context: String },

    /// The validator panicked while the pipeline used
    /// [`FaultPolicy::Abort`](crate::FaultPolicy::Abort).
    #[error("Validator fault in worker {worker_id}: {message}")]
    ValidatorFault { worker_id: usize, message: String },

    /// A worker thread terminated abnormally.
    #[error("Worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    /// The blocking task driving an async run was cancelled or panicked.
    #[cfg(feature = "async-tokio")]
    #[error("Pipeline task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
