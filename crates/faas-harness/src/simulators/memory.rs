//! Memory-use simulation
//!
//! Grows the resident memory footprint a handler observes across warm
//! invocations. Allocations land in the accumulated memory pool and are
//! never released.

use tracing::info;

use crate::config::MemoryUseConfig;
use crate::memory_pool::MemoryPool;
use crate::payload::MEGABYTE;

/// Allocate `size_mb` fresh one-megabyte blocks into `pool`.
pub fn simulate_memory_use(config: &MemoryUseConfig, pool: &MemoryPool) {
    info!(size_mb = config.size_mb, "growing resident memory");
    for _ in 0..config.size_mb {
        pool.allocate_block(MEGABYTE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_grows_by_exactly_size_blocks() {
        let pool = MemoryPool::new();
        simulate_memory_use(&MemoryUseConfig { size_mb: 4 }, &pool);
        assert_eq!(pool.block_count(), 4);
        assert_eq!(pool.allocated_bytes(), 4_000_000);
    }

    #[test]
    fn repeated_calls_accumulate_monotonically() {
        let pool = MemoryPool::new();
        simulate_memory_use(&MemoryUseConfig { size_mb: 3 }, &pool);
        simulate_memory_use(&MemoryUseConfig { size_mb: 2 }, &pool);
        assert_eq!(pool.block_count(), 5);
    }

    #[test]
    fn zero_size_is_a_no_op() {
        let pool = MemoryPool::new();
        simulate_memory_use(&MemoryUseConfig { size_mb: 0 }, &pool);
        assert!(pool.is_empty());
    }
}
