//! Error taxonomy for the Thrum solver.
//!
//! Three fatal classes, organized by the phase that detects them:
//! [`ConfigError`] before any assembly, [`TopologyError`] while resolving
//! coupling edges, and [`NumericalError`] during integration. A run that
//! fails in any class produces no usable time series.

use std::error::Error;
use std::fmt;

use crate::id::BodyId;

// ── ConfigError ────────────────────────────────────────────────────

/// Structural faults in a deck, detected during validation before any
/// integration begins.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A global time setting (TMAX or TSTEP) is non-finite or not
    /// strictly positive.
    InvalidTimeSetting {
        /// Which setting was invalid (`"TMAX"` or `"TSTEP"`).
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The deck defines no bodies.
    NoBodies,
    /// The deck defines more bodies than the supported maximum.
    TooManyBodies {
        /// Number of bodies in the deck.
        count: usize,
    },
    /// A body id falls outside 1..=[`MAX_BODIES`](crate::MAX_BODIES).
    IdOutOfRange {
        /// The offending body.
        body: BodyId,
    },
    /// Two bodies share the same id.
    DuplicateId {
        /// The duplicated id.
        body: BodyId,
    },
    /// A body's mass is non-finite, zero, or negative.
    NonPositiveMass {
        /// The offending body.
        body: BodyId,
        /// The declared mass.
        value: f64,
    },
    /// A body declares no couplings at all. It would float freely, so
    /// the deck is considered incomplete.
    NoCouplings {
        /// The offending body.
        body: BodyId,
    },
    /// A coupling stiffness is non-finite or negative.
    InvalidStiffness {
        /// The declaring body.
        body: BodyId,
        /// The declared stiffness.
        value: f64,
    },
    /// A coupling damping ratio is non-finite or negative.
    InvalidDampingRatio {
        /// The declaring body.
        body: BodyId,
        /// The declared ratio.
        value: f64,
    },
    /// The STIFF, ZTA and CPL lists for one body have different lengths.
    CouplingArityMismatch {
        /// The offending body.
        body: BodyId,
        /// Length of the STIFF list.
        stiff: usize,
        /// Length of the ZTA list.
        zta: usize,
        /// Length of the CPL list.
        cpl: usize,
    },
    /// A forcing angular frequency is non-finite or negative.
    InvalidOmega {
        /// The offending body.
        body: BodyId,
        /// The declared omega.
        value: f64,
    },
    /// A forcing window is inverted or lies outside `[0, TMAX]`.
    ForcingWindow {
        /// The offending body.
        body: BodyId,
        /// Declared start time.
        start: f64,
        /// Effective stop time (TMAX when the sentinel was used).
        stop: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeSetting { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::NoBodies => write!(f, "deck defines no bodies"),
            Self::TooManyBodies { count } => {
                write!(
                    f,
                    "deck defines {count} bodies, maximum is {}",
                    crate::MAX_BODIES
                )
            }
            Self::IdOutOfRange { body } => {
                write!(
                    f,
                    "body id {body} outside valid range 1..={}",
                    crate::MAX_BODIES
                )
            }
            Self::DuplicateId { body } => write!(f, "body id {body} declared twice"),
            Self::NonPositiveMass { body, value } => {
                write!(f, "body {body}: mass must be positive, got {value}")
            }
            Self::NoCouplings { body } => {
                write!(f, "body {body} has no couplings")
            }
            Self::InvalidStiffness { body, value } => {
                write!(f, "body {body}: stiffness must be >= 0, got {value}")
            }
            Self::InvalidDampingRatio { body, value } => {
                write!(f, "body {body}: damping ratio must be >= 0, got {value}")
            }
            Self::CouplingArityMismatch {
                body,
                stiff,
                zta,
                cpl,
            } => {
                write!(
                    f,
                    "body {body}: STIFF/ZTA/CPL lists have lengths {stiff}/{zta}/{cpl}, \
                     expected identical arity"
                )
            }
            Self::InvalidOmega { body, value } => {
                write!(f, "body {body}: OMEGA must be >= 0, got {value}")
            }
            Self::ForcingWindow { body, start, stop } => {
                write!(
                    f,
                    "body {body}: forcing window [{start}, {stop}] is inverted \
                     or outside the simulation time span"
                )
            }
        }
    }
}

impl Error for ConfigError {}

// ── TopologyError ──────────────────────────────────────────────────

/// Faults in the coupling graph, detected while resolving edges.
#[derive(Clone, Debug, PartialEq)]
pub enum TopologyError {
    /// A coupling targets a body id that does not exist in the deck.
    DanglingReference {
        /// The declaring body.
        body: BodyId,
        /// The missing target id.
        target: BodyId,
    },
    /// A body declares a coupling to itself.
    SelfCoupling {
        /// The offending body.
        body: BodyId,
    },
    /// Two bodies declare the same physical spring with different
    /// stiffness values.
    ReciprocalStiffnessMismatch {
        /// The body whose declaration was found second.
        body: BodyId,
        /// The body that declared the spring first.
        partner: BodyId,
        /// Stiffness declared by `body`.
        declared: f64,
        /// Stiffness declared by `partner`.
        partner_declared: f64,
    },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingReference { body, target } => {
                write!(f, "body {body} couples to nonexistent body {target}")
            }
            Self::SelfCoupling { body } => {
                write!(f, "body {body} cannot be coupled to itself")
            }
            Self::ReciprocalStiffnessMismatch {
                body,
                partner,
                declared,
                partner_declared,
            } => {
                write!(
                    f,
                    "bodies {partner} and {body} declare the same spring with \
                     different stiffness ({partner_declared} vs {declared})"
                )
            }
        }
    }
}

impl Error for TopologyError {}

// ── NumericalError ─────────────────────────────────────────────────

/// Which component of the state vector went non-finite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateQuantity {
    /// The displacement component.
    Displacement,
    /// The velocity component.
    Velocity,
    /// The acceleration component.
    Acceleration,
}

impl fmt::Display for StateQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Displacement => write!(f, "displacement"),
            Self::Velocity => write!(f, "velocity"),
            Self::Acceleration => write!(f, "acceleration"),
        }
    }
}

/// A non-finite value (NaN or infinity) produced mid-integration.
///
/// Fatal: the run is aborted and no time series is returned. Usually
/// caused by a pathological stiffness/step-size combination.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericalError {
    /// Index of the step that produced the fault (the sample at `t = 0`
    /// is step 0).
    pub step: usize,
    /// Simulation time at the faulting step.
    pub time: f64,
    /// First body whose state went non-finite.
    pub body: BodyId,
    /// Which state component went non-finite.
    pub quantity: StateQuantity,
}

impl fmt::Display for NumericalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "non-finite {} for body {} at step {} (t = {})",
            self.quantity, self.body, self.step, self.time
        )
    }
}

impl Error for NumericalError {}
