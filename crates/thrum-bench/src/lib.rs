//! Deck profiles for benchmarking.
//!
//! Provides [`chain_profile`], a parameterized n-body chain deck used
//! by the criterion benches: body 1 anchored to ground, each later
//! body sprung to its predecessor, SIN forcing on the last body.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use smallvec::smallvec;
use thrum_core::{
    BodyId, BodyModel, Coupling, CouplingTarget, Deck, ForcingKind, ForcingSpec, SimulationConfig,
};

/// Build an `n`-body chain deck (`1 <= n <= 10`).
///
/// Body 1 is released from `x0 = 1`; masses increase slightly along
/// the chain so the modes do not all coincide.
pub fn chain_profile(n: usize, tmax: f64, tstep: f64) -> Deck {
    let bodies = (1..=n)
        .map(|i| {
            let id = i as u8;
            let target = if i == 1 {
                CouplingTarget::Ground
            } else {
                CouplingTarget::Body(BodyId(id - 1))
            };
            let forcing = if i == n {
                ForcingSpec {
                    kind: ForcingKind::Sin,
                    omega: 2.0,
                    p0: 1.0,
                    start: 0.0,
                    stop: None,
                }
            } else {
                ForcingSpec::quiet()
            };
            BodyModel {
                id: BodyId(id),
                mass: 1.0 + 0.1 * i as f64,
                xloc: 0.0,
                x0: if i == 1 { 1.0 } else { 0.0 },
                v0: 0.0,
                couplings: smallvec![Coupling {
                    target,
                    stiffness: 10.0,
                    damping_ratio: 0.05,
                }],
                forcing,
            }
        })
        .collect();
    Deck {
        config: SimulationConfig { tmax, tstep },
        bodies,
    }
}
