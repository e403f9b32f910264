//! Deck fixtures and builders for Thrum development.
//!
//! Small helpers for constructing bodies and decks in tests, plus the
//! two reference decks used across the workspace: a two-body chain and
//! its three-body extension with a reciprocally declared spring.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use smallvec::smallvec;
use thrum_core::{
    BodyId, BodyModel, Coupling, CouplingTarget, Deck, ForcingKind, ForcingSpec, SimulationConfig,
};

/// A body coupled to ground with one spring-damper, at rest at its
/// reference position.
pub fn grounded(id: u8, mass: f64, stiffness: f64, zeta: f64) -> BodyModel {
    BodyModel {
        id: BodyId(id),
        mass,
        xloc: 0.0,
        x0: 0.0,
        v0: 0.0,
        couplings: smallvec![Coupling {
            target: CouplingTarget::Ground,
            stiffness,
            damping_ratio: zeta,
        }],
        forcing: ForcingSpec::quiet(),
    }
}

/// A body coupled to another body with one spring-damper.
pub fn linked(id: u8, mass: f64, target: u8, stiffness: f64, zeta: f64) -> BodyModel {
    BodyModel {
        id: BodyId(id),
        mass,
        xloc: 0.0,
        x0: 0.0,
        v0: 0.0,
        couplings: smallvec![Coupling {
            target: CouplingTarget::Body(BodyId(target)),
            stiffness,
            damping_ratio: zeta,
        }],
        forcing: ForcingSpec::quiet(),
    }
}

/// Wrap bodies and time settings into a deck.
pub fn deck_of(tmax: f64, tstep: f64, bodies: Vec<BodyModel>) -> Deck {
    Deck {
        config: SimulationConfig { tmax, tstep },
        bodies,
    }
}

/// Single grounded body released from `x0 = 1.0`: the canonical free
/// oscillator with period `2π·sqrt(mass/stiffness)`.
pub fn single_body_deck(mass: f64, stiffness: f64, zeta: f64) -> Deck {
    let mut body = grounded(1, mass, stiffness, zeta);
    body.x0 = 1.0;
    deck_of(10.0, 0.01, vec![body])
}

/// Reference deck: two-body chain. Body 1 is grounded, body 2 hangs
/// off body 1 with `k = 6.0`, `ζ = 0.15`.
pub fn two_body_chain_deck() -> Deck {
    deck_of(
        10.0,
        0.1,
        vec![grounded(1, 1.0, 10.0, 0.1), linked(2, 1.5, 1, 6.0, 0.15)],
    )
}

/// Reference deck: three-body extension of the chain. Body 2 couples
/// to body 1 (`k = 6.0`, `ζ = 0.15`) and body 3 (`k = 4.0`,
/// `ζ = 0.17`); body 3 declares the same spring back to body 2 with
/// `k = 4.0` and a slightly different `ζ = 0.18`.
pub fn three_body_deck() -> Deck {
    let mut body2 = linked(2, 1.5, 1, 6.0, 0.15);
    body2.couplings.push(Coupling {
        target: CouplingTarget::Body(BodyId(3)),
        stiffness: 4.0,
        damping_ratio: 0.17,
    });
    deck_of(
        10.0,
        0.1,
        vec![
            grounded(1, 1.0, 10.0, 0.1),
            body2,
            linked(3, 2.0, 2, 4.0, 0.18),
        ],
    )
}

/// Attach a sinusoidal forcing window to a body.
pub fn with_forcing(mut body: BodyModel, kind: ForcingKind, omega: f64, p0: f64, start: f64, stop: Option<f64>) -> BodyModel {
    body.forcing = ForcingSpec {
        kind,
        omega,
        p0,
        start,
        stop,
    };
    body
}

/// The two-body reference deck in the keyword-block text format,
/// including comments and an inline comment, for loader tests.
pub const TWO_BODY_DECK_TEXT: &str = "\
** Two-body chain reference deck.
*SIMULATION
TMAX=10.0
TSTEP=0.1
ANISTYLE=1
*ENDSIMULATION

*BODY 1
MASS=1.0
STIFF=10.0
ZTA=0.1
CPL=0          ** anchored to ground
X0=0.0
V0=0.0
XLOC=0.0
*FORCE
TYPE=NONE
*ENDFORCE
*ENDBODY

*BODY 2
MASS=1.5
STIFF=6.0
ZTA=0.15
CPL=1
X0=0.2
V0=0.0
XLOC=0.0
*FORCE
TYPE=COS
OMEGA=3.0
P0=1.5
START=0.3
STOP=2.0
*ENDFORCE
*ENDBODY
";
