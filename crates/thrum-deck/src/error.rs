//! Loader error type.

use std::error::Error;
use std::fmt;

use thrum_core::ConfigError;

/// Errors from parsing a deck file.
///
/// Syntax faults carry the 1-based line number where they were
/// detected; semantic faults found by deck validation are wrapped in
/// [`DeckError::Config`].
#[derive(Debug)]
pub enum DeckError {
    /// Reading the file failed.
    Io(std::io::Error),
    /// A keyword line has no `=` value.
    MissingValue {
        /// Line number.
        line: usize,
        /// The keyword missing its value.
        keyword: String,
    },
    /// A numeric value failed to parse.
    InvalidNumber {
        /// Line number.
        line: usize,
        /// The unparseable token.
        token: String,
    },
    /// A `*BODY` line without a body number.
    MissingBodyNumber {
        /// Line number.
        line: usize,
    },
    /// A keyword that is only legal inside a block appeared elsewhere,
    /// or a block delimiter appeared in the wrong context.
    MisplacedKeyword {
        /// Line number.
        line: usize,
        /// The offending keyword.
        keyword: String,
    },
    /// An unrecognized keyword.
    UnknownKeyword {
        /// Line number.
        line: usize,
        /// The offending keyword.
        keyword: String,
    },
    /// A `TYPE` value other than SIN, COS, RAND or NONE.
    UnknownForcingType {
        /// Line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A `*FORCE` block without a `TYPE` line.
    MissingForcingType {
        /// Line number of the `*ENDFORCE`.
        line: usize,
    },
    /// The file ended inside an open block.
    UnterminatedBlock {
        /// Name of the open block.
        block: &'static str,
    },
    /// No `*SIMULATION` block was found.
    MissingSimulationBlock,
    /// The parsed deck failed semantic validation.
    Config(ConfigError),
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "reading deck file: {e}"),
            Self::MissingValue { line, keyword } => {
                write!(f, "line {line}: {keyword} has no value")
            }
            Self::InvalidNumber { line, token } => {
                write!(f, "line {line}: invalid number '{token}'")
            }
            Self::MissingBodyNumber { line } => {
                write!(f, "line {line}: *BODY requires a body number")
            }
            Self::MisplacedKeyword { line, keyword } => {
                write!(f, "line {line}: {keyword} is not valid here")
            }
            Self::UnknownKeyword { line, keyword } => {
                write!(f, "line {line}: unknown keyword '{keyword}'")
            }
            Self::UnknownForcingType { line, token } => {
                write!(f, "line {line}: unknown forcing type '{token}'")
            }
            Self::MissingForcingType { line } => {
                write!(f, "line {line}: *FORCE block has no TYPE")
            }
            Self::UnterminatedBlock { block } => {
                write!(f, "file ended inside an open {block} block")
            }
            Self::MissingSimulationBlock => write!(f, "deck has no *SIMULATION block"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl Error for DeckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DeckError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for DeckError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
