//! Recorded simulation output.

use crate::state::SystemState;

/// Append-only record of every sample a run produced, in time order.
///
/// Sample 0 is the initial condition at `t = 0`; sample `k` is the
/// state after `k` integration steps. A series only exists for runs
/// that finished; a failed run yields an error instead of a truncated
/// series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    samples: Vec<SystemState>,
}

impl TimeSeries {
    /// An empty series with capacity for `samples` entries.
    pub fn with_capacity(samples: usize) -> Self {
        Self {
            samples: Vec::with_capacity(samples),
        }
    }

    /// Append a sample. Callers push in time order.
    pub fn push(&mut self, state: SystemState) {
        self.samples.push(state);
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The k-th sample, if recorded.
    pub fn sample(&self, k: usize) -> Option<&SystemState> {
        self.samples.get(k)
    }

    /// The last recorded sample, if any.
    pub fn last(&self) -> Option<&SystemState> {
        self.samples.last()
    }

    /// All samples in time order.
    pub fn samples(&self) -> &[SystemState] {
        &self.samples
    }

    /// Sample times in order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.t)
    }

    /// One DOF's displacement trace in time order.
    pub fn displacement(&self, dof: usize) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |s| s.x[dof])
    }

    /// One DOF's velocity trace in time order.
    pub fn velocity(&self, dof: usize) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |s| s.v[dof])
    }

    /// One DOF's acceleration trace in time order.
    pub fn acceleration(&self, dof: usize) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(move |s| s.a[dof])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(t: f64, x: f64) -> SystemState {
        SystemState {
            t,
            x: vec![x],
            v: vec![-x],
            a: vec![2.0 * x],
        }
    }

    #[test]
    fn empty_series_has_no_samples() {
        let series = TimeSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.sample(0), None);
        assert_eq!(series.last(), None);
    }

    #[test]
    fn pushes_preserve_order_and_traces() {
        let mut series = TimeSeries::with_capacity(3);
        series.push(sample_at(0.0, 1.0));
        series.push(sample_at(0.1, 0.5));
        series.push(sample_at(0.2, -0.3));
        assert_eq!(series.len(), 3);
        assert_eq!(series.times().collect::<Vec<_>>(), vec![0.0, 0.1, 0.2]);
        assert_eq!(
            series.displacement(0).collect::<Vec<_>>(),
            vec![1.0, 0.5, -0.3]
        );
        assert_eq!(
            series.velocity(0).collect::<Vec<_>>(),
            vec![-1.0, -0.5, 0.3]
        );
        assert_eq!(series.last().unwrap().t, 0.2);
    }
}
