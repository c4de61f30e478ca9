/// Outcome of applying the validator to a single item.
///
/// Exactly one verdict is sent back to the coordinator for every item a
/// worker receives, including items whose validator call panicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The validator returned `true`.
    Pass,
    /// The validator returned `false`.
    Fail,
    /// The validator panicked. `message` is the panic payload when it was a
    /// string.
    Fault { worker_id: usize, message: String },
}

impl Verdict {
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::Fault { .. })
    }
}

/// What a single worker did over the course of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerStats {
    pub worker_id: usize,
    /// Items received from the input channel.
    pub processed: usize,
    pub passed: usize,
    pub faulted: usize,
}

impl WorkerStats {
    pub(crate) const fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            processed: 0,
            passed: 0,
            faulted: 0,
        }
    }

    pub(crate) fn record(&mut self, verdict: &Verdict) {
        self.processed += 1;
        match verdict {
            Verdict::Pass => self.passed += 1,
            Verdict::Fail => {}
            Verdict::Fault { .. } => self.faulted += 1,
        }
    }
}

/// Aggregate result of a pipeline run.
///
/// The counters are owned by the coordinator and only ever updated from the
/// verdicts it receives; `workers` is filled in once every worker has been
/// joined, ordered by worker id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub faulted: usize,
    pub workers: Vec<WorkerStats>,
}

impl Tally {
    /// Number of verdicts received, i.e. the number of items dispatched.
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.faulted
    }

    pub(crate) fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Pass => self.passed += 1,
            Verdict::Fail => self.failed += 1,
            Verdict::Fault { .. } => self.faulted += 1,
        }
    }
}
