//! Coupling-edge resolution.
//!
//! Resolves each body's declared coupling list into an explicit edge
//! list over DOF indices, rejecting dangling references and
//! self-couplings, and reconciling reciprocal declarations.
//!
//! # Reciprocal declarations
//!
//! A deck may declare the spring between bodies `i` and `j` from either
//! endpoint, or from both. Declarations by the *same* body always stand
//! as independent physical springs (parallel multi-edges are legal).
//! When both endpoints declare edges to each other, the declarations
//! are paired up in declaration order as two views of one physical
//! spring: paired stiffness values must agree exactly or the deck is
//! rejected; when paired damping ratios differ, the later declaration
//! is authoritative. Unpaired leftovers stand as independent springs.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use thrum_core::{BodyId, CouplingTarget, Deck, TopologyError};

// ── BodyIndex ──────────────────────────────────────────────────────

/// Bidirectional mapping between body ids and DOF indices.
///
/// DOF indices follow deck declaration order: the first body declared
/// is DOF 0.
#[derive(Clone, Debug)]
pub struct BodyIndex {
    ids: IndexMap<BodyId, usize>,
}

impl BodyIndex {
    /// Build the index from a deck's declaration order.
    pub fn from_deck(deck: &Deck) -> Self {
        let ids = deck
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i))
            .collect();
        Self { ids }
    }

    /// DOF index of a body id, if present.
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.ids.get(&id).copied()
    }

    /// Body id at a DOF index.
    ///
    /// # Panics
    ///
    /// Panics if `dof` is out of range.
    pub fn id_at(&self, dof: usize) -> BodyId {
        *self.ids.get_index(dof).expect("dof in range").0
    }

    /// Number of degrees of freedom.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ── Edges ──────────────────────────────────────────────────────────

/// What the far end of a resolved edge is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    /// Fixed support at the declaring body's own XLOC.
    Ground,
    /// Another body, by DOF index.
    Body(usize),
}

/// One resolved spring-damper edge.
///
/// Body-to-body edges are normalized so `body` is the lower DOF index;
/// assembly treats them as undirected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CouplingEdge {
    /// DOF index of the declaring (or lower-indexed) body.
    pub body: usize,
    /// Far end of the edge.
    pub attach: Attachment,
    /// Spring stiffness in N/m.
    pub stiffness: f64,
    /// Dimensionless damping ratio.
    pub damping_ratio: f64,
}

/// The resolved coupling graph of a deck.
#[derive(Clone, Debug)]
pub struct Topology {
    index: BodyIndex,
    edges: Vec<CouplingEdge>,
}

impl Topology {
    /// Resolve a validated deck's coupling lists into an edge list.
    ///
    /// # Errors
    ///
    /// [`TopologyError::DanglingReference`] for a target id not in the
    /// deck, [`TopologyError::SelfCoupling`] for a body coupled to
    /// itself, and [`TopologyError::ReciprocalStiffnessMismatch`] when
    /// both endpoints declare the same spring with different stiffness.
    pub fn build(deck: &Deck) -> Result<Self, TopologyError> {
        let index = BodyIndex::from_deck(deck);
        let mut edges = Vec::new();
        // Directed body-to-body declarations, keyed by (from, to) DOF.
        let mut directed: BTreeMap<(usize, usize), Vec<(f64, f64)>> = BTreeMap::new();

        for (i, body) in deck.bodies.iter().enumerate() {
            for coupling in &body.couplings {
                match coupling.target {
                    CouplingTarget::Ground => edges.push(CouplingEdge {
                        body: i,
                        attach: Attachment::Ground,
                        stiffness: coupling.stiffness,
                        damping_ratio: coupling.damping_ratio,
                    }),
                    CouplingTarget::Body(target) => {
                        if target == body.id {
                            return Err(TopologyError::SelfCoupling { body: body.id });
                        }
                        let j = index.index_of(target).ok_or(TopologyError::DanglingReference {
                            body: body.id,
                            target,
                        })?;
                        directed.entry((i, j)).or_default().push((
                            coupling.stiffness,
                            coupling.damping_ratio,
                        ));
                    }
                }
            }
        }

        // Pair up reciprocal declarations per unordered DOF pair.
        while let Some((&(from, to), _)) = directed.iter().next() {
            let (a, b) = (from.min(to), from.max(to));
            let fwd = directed.remove(&(a, b)).unwrap_or_default();
            let rev = directed.remove(&(b, a)).unwrap_or_default();
            let paired = fwd.len().min(rev.len());
            for k in 0..paired {
                let (k_fwd, _z_fwd) = fwd[k];
                let (k_rev, z_rev) = rev[k];
                if k_fwd != k_rev {
                    return Err(TopologyError::ReciprocalStiffnessMismatch {
                        body: index.id_at(b),
                        partner: index.id_at(a),
                        declared: k_rev,
                        partner_declared: k_fwd,
                    });
                }
                // The later declaration (body b) wins the damping ratio.
                edges.push(CouplingEdge {
                    body: a,
                    attach: Attachment::Body(b),
                    stiffness: k_fwd,
                    damping_ratio: z_rev,
                });
            }
            for &(stiffness, damping_ratio) in fwd.iter().skip(paired) {
                edges.push(CouplingEdge {
                    body: a,
                    attach: Attachment::Body(b),
                    stiffness,
                    damping_ratio,
                });
            }
            for &(stiffness, damping_ratio) in rev.iter().skip(paired) {
                edges.push(CouplingEdge {
                    body: a,
                    attach: Attachment::Body(b),
                    stiffness,
                    damping_ratio,
                });
            }
        }

        Ok(Self { index, edges })
    }

    /// The body-id-to-DOF index.
    pub fn index(&self) -> &BodyIndex {
        &self.index
    }

    /// The resolved edge list.
    pub fn edges(&self) -> &[CouplingEdge] {
        &self.edges
    }

    /// Number of degrees of freedom.
    pub fn dof_count(&self) -> usize {
        self.index.len()
    }
}
