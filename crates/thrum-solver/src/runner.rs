//! Single-deck simulation driver.
//!
//! [`SimulationRunner`] validates a deck, resolves its topology and
//! assembles the system operators once; [`SimulationRunner::iter`] then
//! produces a fresh [`RunIter`] over the samples of one run. Iterating
//! twice with the same seed replays the identical trajectory, RAND
//! forcing included.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thrum_core::{Deck, NumericalError, SimulationConfig};
use thrum_system::{BodyIndex, SystemMatrices, Topology};

use crate::cancel::CancelToken;
use crate::error::{RunError, SetupError};
use crate::forcing::ForcingSet;
use crate::integrator::Rk4;
use crate::metrics::RunMetrics;
use crate::series::TimeSeries;
use crate::state::SystemState;

// ── SimulationRunner ───────────────────────────────────────────────

/// A validated, assembled deck ready to integrate.
#[derive(Clone, Debug)]
pub struct SimulationRunner {
    config: SimulationConfig,
    index: BodyIndex,
    system: SystemMatrices,
    forcing: ForcingSet,
    x0: Vec<f64>,
    v0: Vec<f64>,
    seed: u64,
    cancel: CancelToken,
    metrics: RunMetrics,
}

impl SimulationRunner {
    /// Validate `deck` and assemble its operators.
    ///
    /// # Errors
    ///
    /// [`SetupError::Config`] when the deck fails validation,
    /// [`SetupError::Topology`] when its coupling graph does not
    /// resolve.
    pub fn new(deck: &Deck) -> Result<Self, SetupError> {
        deck.validate()?;
        let started = Instant::now();
        let topology = Topology::build(deck)?;
        let system = SystemMatrices::assemble(deck, &topology);
        let metrics = RunMetrics {
            assembly_us: started.elapsed().as_micros() as u64,
            ..RunMetrics::default()
        };
        Ok(Self {
            config: deck.config,
            index: topology.index().clone(),
            system,
            forcing: ForcingSet::from_deck(deck),
            x0: deck.bodies.iter().map(|b| b.x0).collect(),
            v0: deck.bodies.iter().map(|b| b.v0).collect(),
            seed: 0,
            cancel: CancelToken::new(),
            metrics,
        })
    }

    /// Set the RNG seed used for RAND forcing. Seed 0 is the default.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use `token` for cancellation instead of the runner's own.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels any in-progress or future run of this
    /// runner.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The deck's time settings.
    pub fn config(&self) -> SimulationConfig {
        self.config
    }

    /// The body-id-to-DOF mapping of the assembled system.
    pub fn index(&self) -> &BodyIndex {
        &self.index
    }

    /// Number of degrees of freedom.
    pub fn dof_count(&self) -> usize {
        self.system.dof_count()
    }

    /// Counters accumulated so far.
    pub fn metrics(&self) -> RunMetrics {
        self.metrics
    }

    /// Start a fresh pass over the run's samples.
    ///
    /// Each call reseeds the RNG and restarts from the initial
    /// conditions; the runner itself is not consumed.
    pub fn iter(&self) -> RunIter<'_> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut rk4 = Rk4::new(self.dof_count());
        let mut state = SystemState {
            t: 0.0,
            x: self.x0.clone(),
            v: self.v0.clone(),
            a: vec![0.0; self.dof_count()],
        };
        rk4.refresh_acceleration(&self.system, &self.forcing, &mut rng, &mut state);
        RunIter {
            config: self.config,
            index: &self.index,
            system: &self.system,
            forcing: &self.forcing,
            cancel: self.cancel.clone(),
            rng,
            rk4,
            state,
            steps: self.config.step_count(),
            next_step: 0,
            fused: false,
        }
    }

    /// Integrate the full time span, recording every sample.
    ///
    /// # Errors
    ///
    /// [`RunError::Numerical`] when a state component goes non-finite,
    /// [`RunError::Cancelled`] when the cancel token fires. Either way
    /// no series is returned.
    pub fn run(&mut self) -> Result<TimeSeries, RunError> {
        let started = Instant::now();
        let mut series = TimeSeries::with_capacity(self.config.step_count() + 1);
        let mut failure = None;
        for sample in self.iter() {
            match sample {
                Ok(state) => series.push(state),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        let steps = series.len().saturating_sub(1) as u64;
        self.metrics.stepping_us += started.elapsed().as_micros() as u64;
        self.metrics.steps += steps;
        // One evaluation derives the initial acceleration, four per step.
        self.metrics.forcing_evals += 1 + 4 * steps;
        match failure {
            Some(e) => Err(e),
            None => Ok(series),
        }
    }
}

// ── RunIter ────────────────────────────────────────────────────────

/// Iterator over the samples of one run, in time order.
///
/// The first item is the initial condition at `t = 0`; each subsequent
/// item is the state after one more integration step. The cancel token
/// is checked between steps. After yielding an error the iterator is
/// fused.
#[derive(Debug)]
pub struct RunIter<'a> {
    config: SimulationConfig,
    index: &'a BodyIndex,
    system: &'a SystemMatrices,
    forcing: &'a ForcingSet,
    cancel: CancelToken,
    rng: ChaCha8Rng,
    rk4: Rk4,
    state: SystemState,
    steps: usize,
    next_step: usize,
    fused: bool,
}

impl RunIter<'_> {
    fn non_finite_error(&self, step: usize) -> Option<RunError> {
        self.state.first_non_finite().map(|(dof, quantity)| {
            NumericalError {
                step,
                time: self.state.t,
                body: self.index.id_at(dof),
                quantity,
            }
            .into()
        })
    }
}

impl Iterator for RunIter<'_> {
    type Item = Result<SystemState, RunError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        if self.next_step == 0 {
            self.next_step = 1;
            if let Some(e) = self.non_finite_error(0) {
                self.fused = true;
                return Some(Err(e));
            }
            return Some(Ok(self.state.clone()));
        }
        let k = self.next_step;
        if k > self.steps {
            return None;
        }
        if self.cancel.is_cancelled() {
            self.fused = true;
            return Some(Err(RunError::Cancelled { step: k }));
        }
        let target = self.config.sample_time(k);
        let dt = target - self.state.t;
        let mut next = self
            .rk4
            .step(self.system, self.forcing, &mut self.rng, &self.state, dt);
        // Pin the recorded time to the exact sample grid.
        next.t = target;
        self.state = next;
        self.next_step += 1;
        if let Some(e) = self.non_finite_error(k) {
            self.fused = true;
            return Some(Err(e));
        }
        Some(Ok(self.state.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.fused {
            return (0, Some(0));
        }
        let remaining = self.steps + 1 - self.next_step.min(self.steps + 1);
        // Errors can cut the run short, so only the upper bound is firm.
        (0, Some(remaining.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thrum_core::{BodyId, ConfigError, StateQuantity};
    use thrum_test_utils::{deck_of, grounded, single_body_deck};

    #[test]
    fn invalid_deck_fails_setup() {
        let deck = deck_of(10.0, 0.1, vec![]);
        match SimulationRunner::new(&deck) {
            Err(SetupError::Config(ConfigError::NoBodies)) => {}
            other => panic!("expected NoBodies, got {other:?}"),
        }
    }

    #[test]
    fn first_sample_is_the_initial_condition() {
        let deck = single_body_deck(1.0, 10.0, 0.1);
        let runner = SimulationRunner::new(&deck).unwrap();
        let first = runner.iter().next().unwrap().unwrap();
        assert_eq!(first.t, 0.0);
        assert_eq!(first.x, vec![1.0]);
        assert_eq!(first.v, vec![0.0]);
        // a(0) = -(k x0 + c v0) / m with c = 2*0.1*sqrt(10).
        assert!((first.a[0] + 10.0).abs() < 1e-12);
    }

    #[test]
    fn iter_yields_step_count_plus_one_samples() {
        let deck = single_body_deck(1.0, 10.0, 0.1);
        let runner = SimulationRunner::new(&deck).unwrap();
        let n = deck.config.step_count();
        let samples: Vec<_> = runner.iter().collect();
        assert_eq!(samples.len(), n + 1);
        assert!(samples.iter().all(|s| s.is_ok()));
    }

    #[test]
    fn iter_restarts_identically() {
        let deck = single_body_deck(1.0, 10.0, 0.1);
        let runner = SimulationRunner::new(&deck).unwrap();
        let a: Vec<_> = runner.iter().map(|s| s.unwrap()).collect();
        let b: Vec<_> = runner.iter().map(|s| s.unwrap()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_initial_condition_aborts_at_step_zero() {
        let mut body = grounded(1, 1.0, 10.0, 0.1);
        body.x0 = f64::INFINITY;
        let deck = deck_of(10.0, 0.1, vec![body]);
        let mut runner = SimulationRunner::new(&deck).unwrap();
        match runner.run() {
            Err(RunError::Numerical(e)) => {
                assert_eq!(e.step, 0);
                assert_eq!(e.body, BodyId(1));
                assert_eq!(e.quantity, StateQuantity::Displacement);
            }
            other => panic!("expected Numerical, got {other:?}"),
        }
    }

    #[test]
    fn cancelled_run_reports_pending_step() {
        let deck = single_body_deck(1.0, 10.0, 0.1);
        let mut runner = SimulationRunner::new(&deck).unwrap();
        runner.cancel_token().cancel();
        match runner.run() {
            Err(RunError::Cancelled { step: 1 }) => {}
            other => panic!("expected Cancelled at step 1, got {other:?}"),
        }
    }

    #[test]
    fn run_metrics_count_steps_and_evals() {
        let deck = single_body_deck(1.0, 10.0, 0.1);
        let mut runner = SimulationRunner::new(&deck).unwrap();
        let n = deck.config.step_count() as u64;
        runner.run().unwrap();
        let m = runner.metrics();
        assert_eq!(m.steps, n);
        assert_eq!(m.forcing_evals, 1 + 4 * n);
    }
}
