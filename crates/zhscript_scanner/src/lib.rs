//! zhscript_scanner: Lexer/tokenizer for zhscript source code.
//!
//! Produces a positioned token stream from source text with support for:
//! - Chinese keywords alongside ASCII literal spellings
//! - ASCII and CJK quote marks for strings
//! - Full-width CJK punctuation, normalized to its ASCII twin
//! - JSX closing-slash and self-closing marks
//!
//! Scanning never fails; characters outside the grammar come back as
//! `Unrecognized` tokens so the parser can report them with a location.

mod char_codes;
pub mod keywords;
mod scanner;
mod token;

pub use keywords::{is_keyword, js_equivalent, keyword_kind};
pub use scanner::{tokenize, Scanner};
pub use token::{Token, TokenKind};
