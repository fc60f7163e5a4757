//! zhscript_ast: Abstract Syntax Tree definitions for the zhscript compiler.
//!
//! Node kinds are closed enums; children are references into the arena the
//! parser allocates from, so a tree is immutable once built and is released
//! together with its arena.

pub mod node;
pub mod operators;

// Re-export key types
pub use node::*;
pub use operators::*;
