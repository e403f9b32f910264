//! Windowed external forcing evaluation.
//!
//! A forcing spec is evaluated as a pure function of `(spec, t)`, plus
//! an RNG for [`ForcingKind::Rand`], which re-samples a uniform draw
//! on `[-1, 1]` independently at every evaluation (including RK4
//! interior stages). Threading the RNG explicitly keeps RAND runs
//! reproducible under a fixed seed.

use rand::Rng;
use thrum_core::{Deck, ForcingKind, ForcingSpec};

/// Instantaneous force from one spec at time `t`.
///
/// Zero outside the inclusive `[start, effective_stop]` window; the
/// window boundary itself is active.
pub fn force_at<R: Rng>(spec: &ForcingSpec, t: f64, tmax: f64, rng: &mut R) -> f64 {
    if !spec.window_contains(t, tmax) {
        return 0.0;
    }
    match spec.kind {
        ForcingKind::Sin => spec.p0 * (spec.omega * t).sin(),
        ForcingKind::Cos => spec.p0 * (spec.omega * t).cos(),
        ForcingKind::Rand => spec.p0 * (rng.gen::<f64>() * 2.0 - 1.0),
        ForcingKind::None => 0.0,
    }
}

/// All bodies' forcing specs in DOF order, bound to the deck's TMAX
/// for stop-sentinel resolution.
#[derive(Clone, Debug)]
pub struct ForcingSet {
    specs: Vec<ForcingSpec>,
    tmax: f64,
}

impl ForcingSet {
    /// Collect the per-body specs from a deck.
    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            specs: deck.bodies.iter().map(|b| b.forcing).collect(),
            tmax: deck.config.tmax,
        }
    }

    /// Number of degrees of freedom.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Whether any spec is [`ForcingKind::Rand`], i.e. the run is only
    /// reproducible under a fixed seed.
    pub fn is_stochastic(&self) -> bool {
        self.specs.iter().any(|s| s.kind == ForcingKind::Rand)
    }

    /// Evaluate the full force vector at time `t` into `out`.
    pub fn eval_into<R: Rng>(&self, t: f64, rng: &mut R, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.specs.len());
        for (slot, spec) in out.iter_mut().zip(&self.specs) {
            *slot = force_at(spec, t, self.tmax, rng);
        }
    }
}
