//! zhscript_core: Core utilities for the zhscript compiler.
//!
//! Provides the compilation arena and the text position types shared by the
//! scanner, parser and diagnostics layers.

pub mod arena;
pub mod text;

// Re-export commonly used types
pub use arena::CompilerArena;
pub use text::{LineMap, Position, TextSpan};
