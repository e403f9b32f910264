//! Run instrumentation counters.

/// Counters and timings accumulated while preparing and driving a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Microseconds spent resolving topology and assembling matrices.
    pub assembly_us: u64,
    /// Microseconds spent in the integration loop.
    pub stepping_us: u64,
    /// Integration steps executed.
    pub steps: u64,
    /// Forcing-vector evaluations performed.
    pub forcing_evals: u64,
}
