//! Global operator assembly.
//!
//! Folds the resolved edge list into the immutable operators of the
//! governing equation `M·a = F(t) + b − C·v − K·x`:
//!
//! - `M` is diagonal (`M[i][i] = mass_i`), stored as a vector.
//! - `K` and `C` are symmetric, built by superposition over edges.
//! - `b` is the constant offset vector induced by differing XLOC
//!   reference positions across coupled bodies.
//!
//! A ground edge with stiffness `k` and ratio `ζ` on body `i` adds `k`
//! to `K[i][i]` and `2ζ√(k·m_i)` to `C[i][i]`. A body-to-body edge
//! `(i, j)` adds the usual `±` stencil to both operators, with the
//! ratio converted through the reduced mass
//! `m_r = m_i·m_j / (m_i + m_j)`.
//!
//! Body-to-body springs have zero natural length between absolute
//! positions `XLOC + x`, so an edge `(i, j)` with stiffness `k` also
//! contributes `k·(xloc_j − xloc_i)` to `b[i]` (and the negation to
//! `b[j]`). Ground springs anchor at the body's own XLOC and contribute
//! no offset. Decks with uniform XLOC therefore have `b = 0`.

use thrum_core::Deck;

use crate::matrix::DenseMatrix;
use crate::topology::{Attachment, Topology};

/// The assembled, immutable operators of one deck.
#[derive(Clone, Debug)]
pub struct SystemMatrices {
    /// Diagonal of the mass matrix, in DOF order.
    pub mass: Vec<f64>,
    /// Elementwise reciprocal of `mass`, precomputed for the O(n)
    /// per-step inversion.
    pub inv_mass: Vec<f64>,
    /// Symmetric damping operator `C`.
    pub damping: DenseMatrix,
    /// Symmetric stiffness operator `K`.
    pub stiffness: DenseMatrix,
    /// Constant offset vector `b` from XLOC differences.
    pub offset: Vec<f64>,
}

impl SystemMatrices {
    /// Assemble the operators for a validated deck and its resolved
    /// topology.
    ///
    /// Infallible: deck validation has already rejected non-positive
    /// masses and negative edge parameters.
    pub fn assemble(deck: &Deck, topology: &Topology) -> Self {
        let n = topology.dof_count();
        let mass: Vec<f64> = deck.bodies.iter().map(|b| b.mass).collect();
        let inv_mass: Vec<f64> = mass.iter().map(|m| 1.0 / m).collect();
        let mut damping = DenseMatrix::zeros(n);
        let mut stiffness = DenseMatrix::zeros(n);
        let mut offset = vec![0.0; n];

        for edge in topology.edges() {
            let i = edge.body;
            let k = edge.stiffness;
            match edge.attach {
                Attachment::Ground => {
                    let c = 2.0 * edge.damping_ratio * (k * mass[i]).sqrt();
                    stiffness.add(i, i, k);
                    damping.add(i, i, c);
                }
                Attachment::Body(j) => {
                    let reduced = mass[i] * mass[j] / (mass[i] + mass[j]);
                    let c = 2.0 * edge.damping_ratio * (k * reduced).sqrt();
                    stiffness.add(i, i, k);
                    stiffness.add(j, j, k);
                    stiffness.add(i, j, -k);
                    stiffness.add(j, i, -k);
                    damping.add(i, i, c);
                    damping.add(j, j, c);
                    damping.add(i, j, -c);
                    damping.add(j, i, -c);
                    let stretch = deck.bodies[j].xloc - deck.bodies[i].xloc;
                    offset[i] += k * stretch;
                    offset[j] -= k * stretch;
                }
            }
        }

        Self {
            mass,
            inv_mass,
            damping,
            stiffness,
            offset,
        }
    }

    /// Number of degrees of freedom.
    pub fn dof_count(&self) -> usize {
        self.mass.len()
    }

    /// Acceleration of the system under external force `f` at state
    /// `(x, v)`, written into `out`: `a = M⁻¹(f + b − C·v − K·x)`.
    pub fn acceleration_into(&self, f: &[f64], x: &[f64], v: &[f64], out: &mut [f64]) {
        for (i, slot) in out.iter_mut().enumerate() {
            let restoring = self.stiffness.row_dot(i, x);
            let dissipative = self.damping.row_dot(i, v);
            *slot = self.inv_mass[i] * (f[i] + self.offset[i] - dissipative - restoring);
        }
    }
}
