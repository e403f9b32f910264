//! Keyword-block deck file loader.
//!
//! Parses the `.ste` text format into a validated
//! [`Deck`](thrum_core::Deck): a `*SIMULATION` block with the global
//! time settings, followed by up to ten `*BODY` blocks each carrying
//! mass, coupling lists, initial conditions and a nested `*FORCE`
//! block. `**` starts a comment, whole-line or inline.
//!
//! The loader is the only component that ever sees the textual format;
//! everything downstream works on the decoded deck and never re-parses
//! the parallel STIFF/ZTA/CPL arrays.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod parser;

pub use error::DeckError;
pub use parser::{parse_file, parse_str};
