//! Line-oriented parser for the keyword-block deck format.

use std::path::Path;

use smallvec::SmallVec;
use thrum_core::{
    BodyId, BodyModel, ConfigError, Coupling, CouplingTarget, Deck, ForcingKind, ForcingSpec,
    SimulationConfig,
};

use crate::DeckError;

/// Which block the parser is currently inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockState {
    TopLevel,
    Simulation,
    Body,
    Force,
}

/// Accumulator for one `*BODY` block. Numeric fields default to zero
/// like the reference format; semantic validation catches anything a
/// deck leaves unset.
struct PartialBody {
    id: BodyId,
    mass: f64,
    x0: f64,
    v0: f64,
    xloc: f64,
    stiff: Vec<f64>,
    zta: Vec<f64>,
    cpl: Vec<CouplingTarget>,
    forcing: ForcingSpec,
}

impl PartialBody {
    fn new(id: BodyId) -> Self {
        Self {
            id,
            mass: 0.0,
            x0: 0.0,
            v0: 0.0,
            xloc: 0.0,
            stiff: Vec::new(),
            zta: Vec::new(),
            cpl: Vec::new(),
            forcing: ForcingSpec::quiet(),
        }
    }

    fn finish(self) -> Result<BodyModel, DeckError> {
        if self.stiff.len() != self.cpl.len() || self.zta.len() != self.cpl.len() {
            return Err(ConfigError::CouplingArityMismatch {
                body: self.id,
                stiff: self.stiff.len(),
                zta: self.zta.len(),
                cpl: self.cpl.len(),
            }
            .into());
        }
        let couplings: SmallVec<[Coupling; 4]> = self
            .cpl
            .iter()
            .zip(self.stiff.iter().zip(&self.zta))
            .map(|(&target, (&stiffness, &damping_ratio))| Coupling {
                target,
                stiffness,
                damping_ratio,
            })
            .collect();
        Ok(BodyModel {
            id: self.id,
            mass: self.mass,
            xloc: self.xloc,
            x0: self.x0,
            v0: self.v0,
            couplings,
            forcing: self.forcing,
        })
    }
}

/// Accumulator for one `*FORCE` block.
#[derive(Default)]
struct PartialForce {
    kind: Option<ForcingKind>,
    omega: f64,
    p0: f64,
    start: f64,
    stop: Option<f64>,
}

/// Drop a `**` comment, whole-line or inline.
fn strip_comment(raw: &str) -> &str {
    match raw.find("**") {
        Some(ix) => &raw[..ix],
        None => raw,
    }
}

fn parse_f64(token: &str, line: usize) -> Result<f64, DeckError> {
    token.trim().parse().map_err(|_| DeckError::InvalidNumber {
        line,
        token: token.trim().to_string(),
    })
}

fn parse_f64_list(value: &str, line: usize) -> Result<Vec<f64>, DeckError> {
    value.split(',').map(|t| parse_f64(t, line)).collect()
}

fn parse_cpl_list(value: &str, line: usize) -> Result<Vec<CouplingTarget>, DeckError> {
    value
        .split(',')
        .map(|t| {
            let raw: u8 = t.trim().parse().map_err(|_| DeckError::InvalidNumber {
                line,
                token: t.trim().to_string(),
            })?;
            Ok(CouplingTarget::from(raw))
        })
        .collect()
}

fn parse_forcing_kind(token: &str, line: usize) -> Result<ForcingKind, DeckError> {
    match token {
        "SIN" => Ok(ForcingKind::Sin),
        "COS" => Ok(ForcingKind::Cos),
        // The reference format spells this RANDOM; accept both.
        "RAND" | "RANDOM" => Ok(ForcingKind::Rand),
        "NONE" => Ok(ForcingKind::None),
        _ => Err(DeckError::UnknownForcingType {
            line,
            token: token.to_string(),
        }),
    }
}

/// Parse a deck from text, returning a fully validated [`Deck`].
pub fn parse_str(input: &str) -> Result<Deck, DeckError> {
    let mut state = BlockState::TopLevel;
    let mut sim_seen = false;
    let mut tmax: Option<f64> = None;
    let mut tstep: Option<f64> = None;
    let mut bodies: Vec<BodyModel> = Vec::new();
    let mut body: Option<PartialBody> = None;
    let mut force: Option<PartialForce> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        // Block delimiters.
        if let Some(rest) = text.strip_prefix('*') {
            let mut parts = rest.split_whitespace();
            let tag = parts.next().unwrap_or("");
            match (tag, state) {
                ("SIMULATION", BlockState::TopLevel) => state = BlockState::Simulation,
                ("ENDSIMULATION", BlockState::Simulation) => {
                    sim_seen = true;
                    state = BlockState::TopLevel;
                }
                ("BODY", BlockState::TopLevel) => {
                    let token = parts
                        .next()
                        .ok_or(DeckError::MissingBodyNumber { line })?;
                    let number: u8 =
                        token.parse().map_err(|_| DeckError::InvalidNumber {
                            line,
                            token: token.to_string(),
                        })?;
                    body = Some(PartialBody::new(BodyId(number)));
                    state = BlockState::Body;
                }
                ("ENDBODY", BlockState::Body) => {
                    let partial = body.take().expect("body block open");
                    bodies.push(partial.finish()?);
                    state = BlockState::TopLevel;
                }
                ("FORCE", BlockState::Body) => {
                    force = Some(PartialForce::default());
                    state = BlockState::Force;
                }
                ("ENDFORCE", BlockState::Force) => {
                    let partial = force.take().expect("force block open");
                    let kind = partial
                        .kind
                        .ok_or(DeckError::MissingForcingType { line })?;
                    body.as_mut().expect("body block open").forcing = ForcingSpec {
                        kind,
                        omega: partial.omega,
                        p0: partial.p0,
                        start: partial.start,
                        stop: partial.stop,
                    };
                    state = BlockState::Body;
                }
                _ => {
                    return Err(DeckError::MisplacedKeyword {
                        line,
                        keyword: format!("*{tag}"),
                    })
                }
            }
            continue;
        }

        // Keyword lines.
        let (keyword, value) = match text.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim())),
            None => (text, None),
        };
        let require = || {
            value.ok_or_else(|| DeckError::MissingValue {
                line,
                keyword: keyword.to_string(),
            })
        };

        match state {
            BlockState::Simulation => match keyword {
                "TMAX" => tmax = Some(parse_f64(require()?, line)?),
                "TSTEP" => tstep = Some(parse_f64(require()?, line)?),
                // Presentation-only animation switch; parsed, ignored.
                "ANISTYLE" => {
                    require()?;
                }
                _ => {
                    return Err(DeckError::UnknownKeyword {
                        line,
                        keyword: keyword.to_string(),
                    })
                }
            },
            BlockState::Body => {
                let b = body.as_mut().expect("body block open");
                match keyword {
                    "MASS" => b.mass = parse_f64(require()?, line)?,
                    "STIFF" => b.stiff = parse_f64_list(require()?, line)?,
                    "ZTA" => b.zta = parse_f64_list(require()?, line)?,
                    "CPL" => b.cpl = parse_cpl_list(require()?, line)?,
                    "X0" => b.x0 = parse_f64(require()?, line)?,
                    "V0" => b.v0 = parse_f64(require()?, line)?,
                    "XLOC" => b.xloc = parse_f64(require()?, line)?,
                    _ => {
                        return Err(DeckError::UnknownKeyword {
                            line,
                            keyword: keyword.to_string(),
                        })
                    }
                }
            }
            BlockState::Force => {
                let f = force.as_mut().expect("force block open");
                match keyword {
                    "TYPE" => f.kind = Some(parse_forcing_kind(require()?, line)?),
                    "OMEGA" => f.omega = parse_f64(require()?, line)?,
                    "P0" => f.p0 = parse_f64(require()?, line)?,
                    "START" => f.start = parse_f64(require()?, line)?,
                    "STOP" => {
                        // Any negative value, including -0, is the
                        // "window extends to TMAX" sentinel.
                        let v = parse_f64(require()?, line)?;
                        f.stop = if v.is_sign_negative() { None } else { Some(v) };
                    }
                    _ => {
                        return Err(DeckError::UnknownKeyword {
                            line,
                            keyword: keyword.to_string(),
                        })
                    }
                }
            }
            BlockState::TopLevel => {
                return Err(DeckError::MisplacedKeyword {
                    line,
                    keyword: keyword.to_string(),
                })
            }
        }
    }

    match state {
        BlockState::TopLevel => {}
        BlockState::Simulation => {
            return Err(DeckError::UnterminatedBlock {
                block: "*SIMULATION",
            })
        }
        BlockState::Body => return Err(DeckError::UnterminatedBlock { block: "*BODY" }),
        BlockState::Force => return Err(DeckError::UnterminatedBlock { block: "*FORCE" }),
    }
    if !sim_seen {
        return Err(DeckError::MissingSimulationBlock);
    }

    let deck = Deck {
        config: SimulationConfig {
            tmax: tmax.unwrap_or(0.0),
            tstep: tstep.unwrap_or(0.0),
        },
        bodies,
    };
    deck.validate()?;
    Ok(deck)
}

/// Read and parse a deck file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Deck, DeckError> {
    let input = std::fs::read_to_string(path)?;
    parse_str(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thrum_test_utils::TWO_BODY_DECK_TEXT;

    #[test]
    fn reference_deck_parses() {
        let deck = parse_str(TWO_BODY_DECK_TEXT).unwrap();
        assert_eq!(deck.config.tmax, 10.0);
        assert_eq!(deck.config.tstep, 0.1);
        assert_eq!(deck.body_count(), 2);

        let b1 = deck.body(BodyId(1)).unwrap();
        assert_eq!(b1.mass, 1.0);
        assert_eq!(b1.couplings.len(), 1);
        assert_eq!(b1.couplings[0].target, CouplingTarget::Ground);
        assert_eq!(b1.forcing.kind, ForcingKind::None);

        let b2 = deck.body(BodyId(2)).unwrap();
        assert_eq!(b2.couplings[0].target, CouplingTarget::Body(BodyId(1)));
        assert_eq!(b2.forcing.kind, ForcingKind::Cos);
        assert_eq!(b2.forcing.start, 0.3);
        assert_eq!(b2.forcing.stop, Some(2.0));
        assert_eq!(b2.x0, 0.2);
    }

    fn minimal_deck(body_block: &str) -> String {
        format!(
            "*SIMULATION\nTMAX=5.0\nTSTEP=0.1\n*ENDSIMULATION\n{body_block}"
        )
    }

    const SIMPLE_BODY: &str = "*BODY 1\nMASS=1.0\nSTIFF=4.0\nZTA=0.0\nCPL=0\n*ENDBODY\n";

    #[test]
    fn force_block_is_optional() {
        let deck = parse_str(&minimal_deck(SIMPLE_BODY)).unwrap();
        assert_eq!(deck.bodies[0].forcing.kind, ForcingKind::None);
    }

    #[test]
    fn comma_lists_share_arity() {
        let block = "*BODY 1\nMASS=1.0\nSTIFF=4.0,2.0\nZTA=0.1,0.2\nCPL=0,0\n*ENDBODY\n";
        let deck = parse_str(&minimal_deck(block)).unwrap();
        assert_eq!(deck.bodies[0].couplings.len(), 2);
        assert_eq!(deck.bodies[0].couplings[1].stiffness, 2.0);
        assert_eq!(deck.bodies[0].couplings[1].damping_ratio, 0.2);
    }

    #[test]
    fn arity_mismatch_rejected_with_body_id() {
        let block = "*BODY 3\nMASS=1.0\nSTIFF=4.0,2.0\nZTA=0.1\nCPL=0,0\n*ENDBODY\n";
        match parse_str(&minimal_deck(block)) {
            Err(DeckError::Config(ConfigError::CouplingArityMismatch {
                body,
                stiff: 2,
                zta: 1,
                cpl: 2,
            })) => assert_eq!(body, BodyId(3)),
            other => panic!("expected CouplingArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn negative_zero_stop_is_sentinel() {
        let block = "*BODY 1\nMASS=1.0\nSTIFF=4.0\nZTA=0.0\nCPL=0\n\
                     *FORCE\nTYPE=SIN\nOMEGA=1.0\nP0=2.0\nSTOP=-0\n*ENDFORCE\n*ENDBODY\n";
        let deck = parse_str(&minimal_deck(block)).unwrap();
        assert_eq!(deck.bodies[0].forcing.stop, None);
    }

    #[test]
    fn random_alias_accepted() {
        let block = "*BODY 1\nMASS=1.0\nSTIFF=4.0\nZTA=0.0\nCPL=0\n\
                     *FORCE\nTYPE=RANDOM\nP0=1.0\n*ENDFORCE\n*ENDBODY\n";
        let deck = parse_str(&minimal_deck(block)).unwrap();
        assert_eq!(deck.bodies[0].forcing.kind, ForcingKind::Rand);
    }

    #[test]
    fn unknown_forcing_type_rejected() {
        let block = "*BODY 1\nMASS=1.0\nSTIFF=4.0\nZTA=0.0\nCPL=0\n\
                     *FORCE\nTYPE=SQUARE\n*ENDFORCE\n*ENDBODY\n";
        match parse_str(&minimal_deck(block)) {
            Err(DeckError::UnknownForcingType { token, .. }) => assert_eq!(token, "SQUARE"),
            other => panic!("expected UnknownForcingType, got {other:?}"),
        }
    }

    #[test]
    fn force_without_type_rejected() {
        let block = "*BODY 1\nMASS=1.0\nSTIFF=4.0\nZTA=0.0\nCPL=0\n\
                     *FORCE\nP0=1.0\n*ENDFORCE\n*ENDBODY\n";
        match parse_str(&minimal_deck(block)) {
            Err(DeckError::MissingForcingType { .. }) => {}
            other => panic!("expected MissingForcingType, got {other:?}"),
        }
    }

    #[test]
    fn invalid_number_carries_line() {
        let input = "*SIMULATION\nTMAX=abc\nTSTEP=0.1\n*ENDSIMULATION\n";
        match parse_str(input) {
            Err(DeckError::InvalidNumber { line: 2, token }) => assert_eq!(token, "abc"),
            other => panic!("expected InvalidNumber at line 2, got {other:?}"),
        }
    }

    #[test]
    fn unknown_keyword_rejected() {
        let block = "*BODY 1\nMASS=1.0\nWEIGHT=2.0\nSTIFF=4.0\nZTA=0.0\nCPL=0\n*ENDBODY\n";
        match parse_str(&minimal_deck(block)) {
            Err(DeckError::UnknownKeyword { keyword, .. }) => assert_eq!(keyword, "WEIGHT"),
            other => panic!("expected UnknownKeyword, got {other:?}"),
        }
    }

    #[test]
    fn keyword_outside_block_rejected() {
        match parse_str("MASS=1.0\n") {
            Err(DeckError::MisplacedKeyword { line: 1, keyword }) => {
                assert_eq!(keyword, "MASS")
            }
            other => panic!("expected MisplacedKeyword, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_body_rejected() {
        let input = "*SIMULATION\nTMAX=5.0\nTSTEP=0.1\n*ENDSIMULATION\n*BODY 1\nMASS=1.0\n";
        match parse_str(input) {
            Err(DeckError::UnterminatedBlock { block: "*BODY" }) => {}
            other => panic!("expected UnterminatedBlock, got {other:?}"),
        }
    }

    #[test]
    fn missing_simulation_block_rejected() {
        match parse_str(SIMPLE_BODY) {
            Err(DeckError::MissingSimulationBlock) => {}
            other => panic!("expected MissingSimulationBlock, got {other:?}"),
        }
    }

    #[test]
    fn missing_body_number_rejected() {
        let input = "*SIMULATION\nTMAX=5.0\nTSTEP=0.1\n*ENDSIMULATION\n*BODY\n*ENDBODY\n";
        match parse_str(input) {
            Err(DeckError::MissingBodyNumber { line: 5 }) => {}
            other => panic!("expected MissingBodyNumber, got {other:?}"),
        }
    }

    #[test]
    fn inline_comment_stripped() {
        let input = "*SIMULATION\nTMAX=5.0 ** end of run\nTSTEP=0.1\n*ENDSIMULATION\n";
        let result = parse_str(input);
        // The deck has no bodies, but TMAX must have parsed cleanly.
        match result {
            Err(DeckError::Config(ConfigError::NoBodies)) => {}
            other => panic!("expected NoBodies, got {other:?}"),
        }
    }

    #[test]
    fn semantic_fault_surfaces_as_config_error() {
        let block = "*BODY 1\nMASS=-1.0\nSTIFF=4.0\nZTA=0.0\nCPL=0\n*ENDBODY\n";
        match parse_str(&minimal_deck(block)) {
            Err(DeckError::Config(ConfigError::NonPositiveMass { body, .. })) => {
                assert_eq!(body, BodyId(1))
            }
            other => panic!("expected NonPositiveMass, got {other:?}"),
        }
    }
}
