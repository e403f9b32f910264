//! External forcing specifications.
//!
//! A forcing spec is a small tagged value: shape, magnitude, frequency
//! and an inclusive time window. Evaluation lives in `thrum-solver`;
//! this module only defines the data and its window arithmetic so the
//! spec stays free of hidden state.

use crate::id::BodyId;
use crate::ConfigError;

/// The shape of a body's external forcing function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForcingKind {
    /// `p0 * sin(omega * t)` inside the window.
    Sin,
    /// `p0 * cos(omega * t)` inside the window.
    Cos,
    /// `p0 * U[-1, 1]`, re-sampled independently at every evaluation.
    Rand,
    /// No external force, ever.
    None,
}

/// Time-windowed external forcing for one body.
///
/// `stop = None` is the deck-file sentinel (`STOP = -1` or `-0`) meaning
/// "the window extends to TMAX". The window is inclusive at both ends:
/// at `t` exactly equal to `start` or the effective stop, the force is
/// active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcingSpec {
    /// Shape of the force function.
    pub kind: ForcingKind,
    /// Angular frequency in rad/s. Unused for [`ForcingKind::Rand`] and
    /// [`ForcingKind::None`].
    pub omega: f64,
    /// Force magnitude in N.
    pub p0: f64,
    /// Window start time in seconds.
    pub start: f64,
    /// Window stop time, or `None` for "equals TMAX".
    pub stop: Option<f64>,
}

impl ForcingSpec {
    /// A spec that applies no force. This is the default for bodies whose
    /// deck block omits the force definition.
    pub fn quiet() -> Self {
        Self {
            kind: ForcingKind::None,
            omega: 0.0,
            p0: 0.0,
            start: 0.0,
            stop: None,
        }
    }

    /// Resolve the stop sentinel against the simulation end time.
    pub fn effective_stop(&self, tmax: f64) -> f64 {
        self.stop.unwrap_or(tmax)
    }

    /// Whether `t` lies inside the inclusive forcing window.
    ///
    /// Always `false` for [`ForcingKind::None`].
    pub fn window_contains(&self, t: f64, tmax: f64) -> bool {
        if self.kind == ForcingKind::None {
            return false;
        }
        t >= self.start && t <= self.effective_stop(tmax)
    }

    /// Check window and frequency invariants for the body declaring
    /// this spec.
    ///
    /// A [`ForcingKind::None`] spec is always valid regardless of its
    /// numeric fields.
    pub fn validate(&self, body: BodyId, tmax: f64) -> Result<(), ConfigError> {
        if self.kind == ForcingKind::None {
            return Ok(());
        }
        if !self.omega.is_finite() || self.omega < 0.0 {
            return Err(ConfigError::InvalidOmega {
                body,
                value: self.omega,
            });
        }
        let stop = self.effective_stop(tmax);
        let window_ok = self.start.is_finite()
            && stop.is_finite()
            && self.start >= 0.0
            && stop <= tmax
            && self.start <= stop;
        if !window_ok {
            return Err(ConfigError::ForcingWindow {
                body,
                start: self.start,
                stop,
            });
        }
        Ok(())
    }
}

impl Default for ForcingSpec {
    fn default() -> Self {
        Self::quiet()
    }
}
