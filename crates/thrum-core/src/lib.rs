//! Core types for the Thrum multi-body dynamics solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the in-memory data model for a simulation deck (bodies, couplings,
//! forcing specifications, and the global time window) together with
//! the validation rules and error taxonomy shared by the rest of the
//! workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod body;
pub mod config;
pub mod deck;
pub mod error;
pub mod forcing;
pub mod id;

pub use body::{BodyModel, Coupling, CouplingTarget};
pub use config::SimulationConfig;
pub use deck::{Deck, MAX_BODIES};
pub use error::{ConfigError, NumericalError, StateQuantity, TopologyError};
pub use forcing::{ForcingKind, ForcingSpec};
pub use id::BodyId;
