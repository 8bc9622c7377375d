#![deny(missing_docs)]

//! # carl
//!
//! Translates Notation3 (N3) documents into N3P, a Prolog-style fact/rule
//! stream consumed by a forward-chaining rule engine.

pub mod ast;
pub mod blank;
pub mod error;
pub mod escape;
pub mod format;
pub mod iri;
pub mod lexer;
pub mod ns;
pub mod parse;
pub mod token;
pub mod writer;

pub use crate::error::{Error, Result};
pub use crate::format::{FormatOptions, N3PFormatter};
pub use crate::lexer::Lexer;
pub use crate::parse::{Parser, TripleSink};
pub use crate::writer::Writer;

/// Parse the N3 document in `input` (already resolved against `base`) and
/// write its translation as N3P to `out`.
///
/// A thin convenience wrapper over [`Lexer`], [`Parser`] and [`Writer`] for
/// the common single-document case; [`main`](../../src/carl/main.rs.html)
/// drives these directly when it needs to report per-input diagnostics.
pub fn translate<W: std::io::Write>(
    input: &str,
    base: &str,
    out: W,
    options: FormatOptions,
) -> Result<u32> {
    let mut writer = Writer::new(out, options);
    let lexer = Lexer::new(input);
    {
        let mut parser = Parser::new(lexer, base, &mut writer)?;
        parser.parse()?;
    }
    Ok(writer.count())
}
