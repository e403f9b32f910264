//! Coupling topology resolution and global operator assembly.
//!
//! Turns a validated deck into the pieces the integrator consumes:
//! a body-id-to-DOF index, an explicit coupling-edge list, and the
//! assembled mass/damping/stiffness operators plus constant offset
//! vector. Assembly is a pure fold over edges into dense matrices;
//! the result is immutable and reused unchanged for every step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assembly;
pub mod matrix;
pub mod topology;

pub use assembly::SystemMatrices;
pub use matrix::DenseMatrix;
pub use topology::{Attachment, BodyIndex, CouplingEdge, Topology};
