//! Strongly-typed body identifier.

use std::fmt;

/// Identifies a mass body within a deck.
///
/// Deck files number bodies starting at 1; the value 0 is reserved for
/// the ground anchor in coupling lists and is never a valid `BodyId`.
/// Range checking (1..=[`MAX_BODIES`](crate::MAX_BODIES)) happens during
/// deck validation, not at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u8);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for BodyId {
    fn from(v: u8) -> Self {
        Self(v)
    }
}
