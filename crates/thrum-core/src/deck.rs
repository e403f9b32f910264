//! A complete, validated simulation deck.

use crate::body::BodyModel;
use crate::config::SimulationConfig;
use crate::id::BodyId;
use crate::ConfigError;

/// Maximum number of bodies a deck may define.
pub const MAX_BODIES: usize = 10;

/// A loaded input deck: global time settings plus up to
/// [`MAX_BODIES`] bodies.
///
/// Body order is declaration order; the solver assigns degree-of-freedom
/// indices in this order. Construct via a loader (`thrum-deck`) or
/// directly in code, then call [`validate`](Deck::validate) before
/// handing the deck to the solver.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    /// Global time window and step size.
    pub config: SimulationConfig,
    /// Bodies in declaration order.
    pub bodies: Vec<BodyModel>,
}

impl Deck {
    /// Check all deck-level and per-body invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }
        if self.bodies.len() > MAX_BODIES {
            return Err(ConfigError::TooManyBodies {
                count: self.bodies.len(),
            });
        }
        let mut seen = [false; MAX_BODIES + 1];
        for body in &self.bodies {
            body.validate(self.config.tmax)?;
            let idx = usize::from(body.id.0);
            if seen[idx] {
                return Err(ConfigError::DuplicateId { body: body.id });
            }
            seen[idx] = true;
        }
        Ok(())
    }

    /// Number of bodies (degrees of freedom).
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Look up a body by id.
    pub fn body(&self, id: BodyId) -> Option<&BodyModel> {
        self.bodies.iter().find(|b| b.id == id)
    }
}
