//! Accumulated memory pool
//!
//! Models a handler that leaks memory across invocations inside a warm
//! execution context: blocks are appended for the lifetime of the owning
//! harness and never released. Tests instantiate their own pools instead
//! of sharing ambient process state.

use parking_lot::Mutex;

/// Append-only collection of retained heap blocks.
///
/// There is deliberately no removal API. The pool only grows.
#[derive(Debug, Default)]
pub struct MemoryPool {
    blocks: Mutex<Vec<Box<[u64]>>>,
}

impl MemoryPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh block of `bytes` addressable bytes and retain it.
    ///
    /// Every word is written so the allocation is actually resident rather
    /// than a lazily mapped reservation.
    pub fn allocate_block(&self, bytes: usize) {
        let words = bytes / std::mem::size_of::<u64>();
        let block: Box<[u64]> = (0..words as u64).collect::<Vec<u64>>().into_boxed_slice();
        self.blocks.lock().push(block);
    }

    /// Number of blocks retained so far.
    pub fn block_count(&self) -> usize {
        self.blocks.lock().len()
    }

    /// Total bytes retained across all blocks.
    pub fn allocated_bytes(&self) -> usize {
        self.blocks
            .lock()
            .iter()
            .map(|block| block.len() * std::mem::size_of::<u64>())
            .sum()
    }

    /// Whether nothing has been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.blocks.lock().is_empty()
    }
}
