//! Producer / worker-pool pipeline.
//!
//! A [`Pipeline`] owns nothing but its configuration. Each call to
//! [`Pipeline::run`] spawns a fresh pool of workers, drains the given
//! [`Sequence`] through them and joins them again before returning, so runs
//! are independent of each other and the tally is a plain return value.
//!
//! ```text
//! Sequence ──► coordinator ──► item channel ──► worker 1..=W
//!                   ▲                               │
//!                   └──────── verdict channel ◄─────┘
//! ```

mod coordinator;
#[cfg(test)]
mod tests;
mod verdict;
mod worker;

pub use verdict::{Tally, Verdict, WorkerStats};

use crate::{Error, Result, Sequence};

/// What the coordinator does when the validator panics on an item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultPolicy {
    /// Count the item in [`Tally::faulted`] and keep going.
    #[default]
    Contain,
    /// Stop dispatching and return [`Error::ValidatorFault`].
    Abort,
}

/// A fixed-size pool of validator workers.
///
/// # Example
///
/// ```
/// use vetpool::{FaultPolicy, Pipeline, Sequence};
///
/// let mut sequence = Sequence::lifo();
/// sequence.extend([5, 12, 19, 26]);
///
/// let tally = Pipeline::new(3)?
///     .with_fault_policy(FaultPolicy::Abort)
///     .run(&mut sequence, |n: &i32| n % 2 == 0)?;
///
/// assert_eq!(tally.passed, 2);
/// assert_eq!(tally.failed, 2);
/// assert!(sequence.is_empty());
/// # Ok::<(), vetpool::Error>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pipeline {
    num_workers: usize,
    fault_policy: FaultPolicy,
}

impl Pipeline {
    /// Creates a pipeline that runs `num_workers` workers per pass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWorkerCount`] if `num_workers` is 0; a pool
    /// without workers would block forever on the first item.
    pub fn new(num_workers: usize) -> Result<Self> {
        if num_workers == 0 {
            return Err(Error::InvalidWorkerCount(num_workers));
        }
        Ok(Self {
            num_workers,
            fault_policy: FaultPolicy::Contain,
        })
    }

    #[must_use]
    pub const fn with_fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }

    pub const fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub const fn fault_policy(&self) -> FaultPolicy {
        self.fault_policy
    }

    /// Drains `sequence` through the worker pool and returns the tally.
    ///
    /// Items are removed in the sequence's discipline order. Which worker
    /// validates which item is unspecified, but every item is validated
    /// exactly once and the counters do not depend on scheduling.
    ///
    /// On success `sequence` is empty. With [`FaultPolicy::Abort`] a fault
    /// leaves the undispatched items in place.
    ///
    /// # Errors
    ///
    /// See [`Error`]. Under the default [`FaultPolicy::Contain`] a panicking
    /// validator is not an error.
    pub fn run<T, F>(&self, sequence: &mut Sequence<T>, validator: F) -> Result<Tally>
    where
        T: Send,
        F: Fn(&T) -> bool + Sync,
    {
        coordinator::coordinate(self.num_workers, self.fault_policy, sequence, &validator)
    }
}

/// Drains `sequence` through `num_workers` workers and returns how many items
/// the validator accepted.
///
/// Shorthand for [`Pipeline::new`] followed by [`Pipeline::run`] with the
/// default [`FaultPolicy::Contain`]; items whose validator call panicked are
/// not counted.
///
/// ```
/// use vetpool::Sequence;
///
/// let mut queue = Sequence::fifo();
/// queue.extend(["Hello World", "Generics", "World Wide Web"]);
///
/// let count = vetpool::run(&mut queue, |s: &&str| s.contains("World"), 3)?;
/// assert_eq!(count, 2);
/// # Ok::<(), vetpool::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidWorkerCount`] if `num_workers` is 0, or any error
/// from [`Pipeline::run`].
pub fn run<T, F>(sequence: &mut Sequence<T>, validator: F, num_workers: usize) -> Result<usize>
where
    T: Send,
    F: Fn(&T) -> bool + Sync,
{
    Pipeline::new(num_workers)?
        .run(sequence, validator)
        .map(|tally| tally.passed)
}
