//! Fixed-step simulation engine for Thrum decks.
//!
//! Drives the time loop over an assembled system: evaluates windowed
//! forcing, advances state with classical fourth-order Runge-Kutta,
//! records per-step snapshots into an append-only time series, and
//! supports cooperative cancellation plus shared-nothing batch
//! execution across independent decks.
//!
//! A single run is sequential and deterministic; RAND forcing draws
//! from an injectable seeded RNG, so runs are reproducible when the
//! seed is fixed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod cancel;
pub mod error;
pub mod forcing;
pub mod integrator;
pub mod metrics;
pub mod runner;
pub mod series;
pub mod state;

pub use batch::run_batch;
pub use cancel::CancelToken;
pub use error::{BatchError, RunError, SetupError};
pub use forcing::{force_at, ForcingSet};
pub use integrator::Rk4;
pub use metrics::RunMetrics;
pub use runner::{RunIter, SimulationRunner};
pub use series::TimeSeries;
pub use state::SystemState;
