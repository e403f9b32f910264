//! Thrum: a multi-body mass-spring-damper simulator.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Thrum sub-crates. For most users, adding `thrum` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use thrum::prelude::*;
//!
//! // A single body on a ground spring, released from x0 = 1.
//! let deck = Deck {
//!     config: SimulationConfig {
//!         tmax: 1.0,
//!         tstep: 0.01,
//!     },
//!     bodies: vec![BodyModel {
//!         id: BodyId(1),
//!         mass: 1.0,
//!         xloc: 0.0,
//!         x0: 1.0,
//!         v0: 0.0,
//!         couplings: vec![Coupling {
//!             target: CouplingTarget::Ground,
//!             stiffness: 10.0,
//!             damping_ratio: 0.1,
//!         }]
//!         .into(),
//!         forcing: ForcingSpec::quiet(),
//!     }],
//! };
//!
//! let mut runner = SimulationRunner::new(&deck).unwrap();
//! let series = runner.run().unwrap();
//! assert_eq!(series.len(), deck.config.step_count() + 1);
//! assert_eq!(series.last().unwrap().t, 1.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `thrum-core` | Deck model, body and forcing specs, validation errors |
//! | [`deck`] | `thrum-deck` | Keyword-block deck file loader |
//! | [`system`] | `thrum-system` | Topology resolution and operator assembly |
//! | [`solver`] | `thrum-solver` | RK4 integration, time series, batches, cancellation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Deck model, body and forcing specs, validation errors (`thrum-core`).
pub use thrum_core as types;

/// Keyword-block deck file loader (`thrum-deck`).
///
/// [`deck::parse_str`] and [`deck::parse_file`] decode the `.ste` text
/// format into a validated [`types::Deck`].
pub use thrum_deck as deck;

/// Topology resolution and operator assembly (`thrum-system`).
///
/// Resolves coupling declarations into an edge list and folds it into
/// the mass, damping and stiffness operators.
pub use thrum_system as system;

/// RK4 integration, time series, batches, cancellation (`thrum-solver`).
///
/// [`solver::SimulationRunner`] drives a single deck;
/// [`solver::run_batch`] fans a slice of decks out across worker
/// threads.
pub use thrum_solver as solver;

/// Common imports for typical Thrum usage.
///
/// ```rust
/// use thrum::prelude::*;
/// ```
pub mod prelude {
    // Deck model
    pub use thrum_core::{
        BodyId, BodyModel, Coupling, CouplingTarget, Deck, ForcingKind, ForcingSpec,
        SimulationConfig, MAX_BODIES,
    };

    // Errors
    pub use thrum_core::{ConfigError, NumericalError, StateQuantity, TopologyError};
    pub use thrum_deck::DeckError;
    pub use thrum_solver::{BatchError, RunError, SetupError};

    // Loader
    pub use thrum_deck::{parse_file, parse_str};

    // Solver
    pub use thrum_solver::{
        run_batch, CancelToken, RunMetrics, SimulationRunner, SystemState, TimeSeries,
    };
}
