//! Mass bodies and their coupling declarations.

use smallvec::SmallVec;

use crate::forcing::ForcingSpec;
use crate::id::BodyId;
use crate::{ConfigError, MAX_BODIES};

/// What the far end of a coupling is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CouplingTarget {
    /// A fixed support. In deck files this is CPL value 0.
    Ground,
    /// Another body in the deck.
    Body(BodyId),
}

impl From<u8> for CouplingTarget {
    /// Decode a raw CPL value: 0 is ground, anything else a body id.
    fn from(raw: u8) -> Self {
        if raw == 0 {
            Self::Ground
        } else {
            Self::Body(BodyId(raw))
        }
    }
}

/// One spring-damper connection declared by a body.
///
/// The damping ratio is dimensionless; conversion to a damping
/// coefficient happens during matrix assembly, where the relevant mass
/// is known.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coupling {
    /// Far end of the connection.
    pub target: CouplingTarget,
    /// Spring stiffness in N/m.
    pub stiffness: f64,
    /// Dimensionless damping ratio.
    pub damping_ratio: f64,
}

/// Validated in-memory representation of one mass body.
///
/// A body has one translational degree of freedom. `x0` and `v0` are
/// measured relative to `xloc`, the position at which the body's ground
/// spring is unstretched.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyModel {
    /// Deck-assigned body number, 1..=[`MAX_BODIES`].
    pub id: BodyId,
    /// Mass in kg, strictly positive.
    pub mass: f64,
    /// Free/reference position in m.
    pub xloc: f64,
    /// Initial displacement relative to `xloc`, in m.
    pub x0: f64,
    /// Initial velocity in m/s.
    pub v0: f64,
    /// Ordered coupling declarations. Most decks have a small fan-out,
    /// so the list is inline up to four entries.
    pub couplings: SmallVec<[Coupling; 4]>,
    /// External forcing applied to this body.
    pub forcing: ForcingSpec,
}

impl BodyModel {
    /// Check all per-body invariants: id range, positive mass, at least
    /// one coupling, non-negative coupling parameters, and a well-formed
    /// forcing window.
    pub fn validate(&self, tmax: f64) -> Result<(), ConfigError> {
        if self.id.0 == 0 || usize::from(self.id.0) > MAX_BODIES {
            return Err(ConfigError::IdOutOfRange { body: self.id });
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass {
                body: self.id,
                value: self.mass,
            });
        }
        if self.couplings.is_empty() {
            return Err(ConfigError::NoCouplings { body: self.id });
        }
        for coupling in &self.couplings {
            if !coupling.stiffness.is_finite() || coupling.stiffness < 0.0 {
                return Err(ConfigError::InvalidStiffness {
                    body: self.id,
                    value: coupling.stiffness,
                });
            }
            if !coupling.damping_ratio.is_finite() || coupling.damping_ratio < 0.0 {
                return Err(ConfigError::InvalidDampingRatio {
                    body: self.id,
                    value: coupling.damping_ratio,
                });
            }
        }
        self.forcing.validate(self.id, tmax)
    }
}
