//! Arena allocation for the compiler.
//!
//! Every AST node of one compilation is allocated from a bump arena owned by
//! the caller; the whole tree is released at once when the arena drops.

use bumpalo::Bump;

/// Bytes of arena reserved per byte of source.
const NODE_BYTES_PER_SOURCE_BYTE: usize = 8;

/// The arena of one source file.
///
/// Nodes only hold references into the arena and `Copy` data, so nothing
/// inside needs dropping.
pub struct CompilerArena {
    bump: Bump,
}

impl CompilerArena {
    /// An arena sized for a source of `source_len` bytes, so ordinary files
    /// parse without growing it.
    pub fn for_source(source_len: usize) -> Self {
        Self {
            bump: Bump::with_capacity(source_len.saturating_mul(NODE_BYTES_PER_SOURCE_BYTE)),
        }
    }

    /// The allocator the parser builds the tree in.
    #[inline]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_source_reserves_up_front() {
        let arena = CompilerArena::for_source(100);
        assert!(arena.bump().allocated_bytes() >= 100 * NODE_BYTES_PER_SOURCE_BYTE);
    }

    #[test]
    fn test_empty_source_arena_still_allocates() {
        let arena = CompilerArena::for_source(0);
        assert_eq!(arena.bump().alloc_str("令"), "令");
    }
}
