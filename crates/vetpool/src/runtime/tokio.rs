use crate::{Pipeline, Result, Sequence, Tally};
use core::future::Future;

/// Extension trait for driving a [`Pipeline`] from inside the
/// [`tokio`](https://docs.rs/tokio) async runtime.
///
/// A pipeline pass blocks its calling thread on channel rendezvous until the
/// sequence is drained. Calling [`Pipeline::run`] directly from an async task
/// would stall one of the runtime's worker threads for the whole pass, so this
/// trait moves the pass onto tokio's blocking thread pool instead.
pub trait PipelineAsyncTokioExt: Sized {
    /// Returns a future that drains `sequence` on tokio's blocking pool and
    /// resolves to the [`Tally`].
    ///
    /// The sequence and validator are moved into the blocking task, which is
    /// why both must be `'static`. Items left undispatched by an aborted run
    /// are dropped with the sequence.
    ///
    /// # Errors
    ///
    /// Any error from [`Pipeline::run`], or [`Error::Join`] if the blocking
    /// task panicked or the runtime shut down underneath it.
    ///
    /// [`Error::Join`]: crate::Error::Join
    fn run_async<T, F>(
        self,
        sequence: Sequence<T>,
        validator: F,
    ) -> impl Future<Output = Result<Tally>> + Send
    where
        T: Send + 'static,
        F: Fn(&T) -> bool + Send + Sync + 'static;
}

impl PipelineAsyncTokioExt for Pipeline {
    fn run_async<T, F>(
        self,
        mut sequence: Sequence<T>,
        validator: F,
    ) -> impl Future<Output = Result<Tally>> + Send
    where
        T: Send + 'static,
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        async move {
            tokio::task::spawn_blocking(move || self.run(&mut sequence, validator)).await?
        }
    }
}
