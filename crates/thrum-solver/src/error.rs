//! Solver error types.

use std::error::Error;
use std::fmt;

use thrum_core::{ConfigError, NumericalError, TopologyError};

// ── SetupError ─────────────────────────────────────────────────────

/// Faults detected while preparing a run, before any integration.
#[derive(Clone, Debug, PartialEq)]
pub enum SetupError {
    /// The deck failed validation.
    Config(ConfigError),
    /// The coupling graph failed to resolve.
    Topology(TopologyError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Topology(e) => write!(f, "topology: {e}"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Topology(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TopologyError> for SetupError {
    fn from(e: TopologyError) -> Self {
        Self::Topology(e)
    }
}

// ── RunError ───────────────────────────────────────────────────────

/// Faults that abort a run mid-loop. No partial time series survives.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// A state component went non-finite.
    Numerical(NumericalError),
    /// The run's cancellation token was triggered.
    Cancelled {
        /// Index of the step that would have executed next.
        step: usize,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numerical(e) => write!(f, "{e}"),
            Self::Cancelled { step } => write!(f, "run cancelled before step {step}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Numerical(e) => Some(e),
            Self::Cancelled { .. } => None,
        }
    }
}

impl From<NumericalError> for RunError {
    fn from(e: NumericalError) -> Self {
        Self::Numerical(e)
    }
}

// ── BatchError ─────────────────────────────────────────────────────

/// Per-deck failure inside a batch. A failing deck never aborts its
/// siblings.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchError {
    /// Preparing the deck failed.
    Setup(SetupError),
    /// The run itself failed.
    Run(RunError),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup(e) => write!(f, "{e}"),
            Self::Run(e) => write!(f, "{e}"),
        }
    }
}

impl Error for BatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Setup(e) => Some(e),
            Self::Run(e) => Some(e),
        }
    }
}

impl From<SetupError> for BatchError {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}

impl From<RunError> for BatchError {
    fn from(e: RunError) -> Self {
        Self::Run(e)
    }
}
