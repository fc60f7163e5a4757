//! zhscript_parser: Recursive descent parser for zhscript.
//!
//! Parses token streams from the scanner into an arena-allocated AST. The
//! first structural mismatch ends the parse with a positioned [`ParseError`].

mod error;
mod parser;
mod precedence;

pub use error::ParseError;
pub use parser::{parse, MAX_RECURSION_DEPTH};

use bumpalo::Bump;
use zhscript_ast::Program;

/// Tokenize and parse `source` in one step.
pub fn parse_source<'a>(arena: &'a Bump, source: &str) -> Result<Program<'a>, ParseError> {
    parse(arena, &zhscript_scanner::tokenize(source))
}
