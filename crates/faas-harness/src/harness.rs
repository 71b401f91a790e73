//! Simulation orchestrator
//!
//! [`Harness`] owns the long-lived simulation state (the accumulated
//! memory pool and a seedable RNG) and sequences the active simulations
//! around a handler invocation. The evaluation order is fixed:
//! concurrency limit, cold start, timeout, cache use, memory use, then the
//! handler itself (once, or through the retry simulator). The concurrency
//! limit runs first and its failure propagates unconditionally, so every
//! later step, including the handler, is skipped when it fires.

use futures::future::BoxFuture;
use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{
    CacheUseConfig, ColdStartConfig, ConcurrencyLimitConfig, MemoryUseConfig, RetriesConfig,
    SimulationConfig, TimeoutConfig,
};
use crate::error::{HandlerError, HarnessError, Result};
use crate::memory_pool::MemoryPool;
use crate::simulators;

/// Await one handler invocation, passing a copy of the parameters through
/// unchanged and surfacing any handler failure verbatim as
/// [`HarnessError::Handler`].
pub async fn invoke_handler<F, P, T>(handler: &mut F, params: &P) -> Result<T>
where
    F: FnMut(P) -> BoxFuture<'static, std::result::Result<T, HandlerError>>,
    P: Clone,
{
    handler(params.clone()).await.map_err(HarnessError::Handler)
}

/// Fault-injection harness for FaaS handlers.
///
/// A single harness models one warm execution context: memory allocated by
/// the memory-use simulation accumulates across every run for the
/// harness's lifetime. Construct with [`Harness::with_seed`] for
/// reproducible randomness.
pub struct Harness {
    memory_pool: Arc<MemoryPool>,
    rng: Mutex<ChaCha8Rng>,
}

impl Harness {
    /// Harness with entropy-seeded randomness.
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    /// Harness with deterministic randomness, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            memory_pool: Arc::new(MemoryPool::new()),
            rng: Mutex::new(rng),
        }
    }

    /// Replace the accumulated memory pool with an injected handle, e.g.
    /// one shared between harnesses or inspected by a test.
    pub fn with_memory_pool(mut self, pool: Arc<MemoryPool>) -> Self {
        self.memory_pool = pool;
        self
    }

    /// The accumulated memory pool backing the memory-use simulation.
    pub fn memory_pool(&self) -> &Arc<MemoryPool> {
        &self.memory_pool
    }

    // Child RNG forked off the parent stream. Simulations that suspend
    // draw from a fork so the RNG lock is never held across an await.
    fn fork_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.rng.lock().next_u64())
    }

    /// Run the configured simulations around one handler invocation and
    /// return the final invocation's result.
    pub async fn run<F, P, T>(
        &self,
        config: &SimulationConfig,
        mut handler: F,
        params: P,
    ) -> Result<T>
    where
        F: FnMut(P) -> BoxFuture<'static, std::result::Result<T, HandlerError>>,
        P: Clone,
    {
        if let Some(limit) = &config.concurrency_limit {
            self.simulate_concurrency_limit(limit)?;
        }

        if let Some(cold_start) = &config.cold_start {
            self.simulate_cold_start(cold_start).await;
        }

        if let Some(timeout) = &config.timeout {
            self.simulate_timeout(timeout).await;
        }

        if let Some(cache_use) = &config.cache_use {
            self.simulate_cache_use(cache_use)?;
        }

        if let Some(memory_use) = &config.memory_use {
            self.simulate_memory_use(memory_use);
        }

        match &config.retries {
            Some(RetriesConfig { retries }) => {
                self.simulate_retries(*retries, &mut handler, &params).await
            }
            None => invoke_handler(&mut handler, &params).await,
        }
    }

    /// Suspend for a cold-start delay, returning the delay chosen.
    pub async fn simulate_cold_start(&self, config: &ColdStartConfig) -> Duration {
        let mut rng = self.fork_rng();
        simulators::cold_start::simulate_cold_start(config, &mut rng).await
    }

    /// Suspend for the configured timeout, returning the elapsed
    /// suspension if one happened.
    pub async fn simulate_timeout(&self, config: &TimeoutConfig) -> Option<Duration> {
        let mut rng = self.fork_rng();
        simulators::timeout::simulate_timeout(config, &mut rng).await
    }

    /// Signal a concurrency-limit failure, always or on a coin flip.
    pub fn simulate_concurrency_limit(&self, config: &ConcurrencyLimitConfig) -> Result<()> {
        simulators::concurrency::simulate_concurrency_limit(config, &mut *self.rng.lock())
    }

    /// Invoke `handler` `retry_count` times, keeping only the last result.
    pub async fn simulate_retries<F, P, T>(
        &self,
        retry_count: u32,
        handler: &mut F,
        params: &P,
    ) -> Result<T>
    where
        F: FnMut(P) -> BoxFuture<'static, std::result::Result<T, HandlerError>>,
        P: Clone,
    {
        simulators::retry::simulate_retries(retry_count, handler, params).await
    }

    /// Fill the configured cache directory with filler data.
    pub fn simulate_cache_use(&self, config: &CacheUseConfig) -> Result<()> {
        simulators::cache::simulate_cache_use(config, &mut *self.rng.lock())
    }

    /// Grow the accumulated memory pool.
    pub fn simulate_memory_use(&self, config: &MemoryUseConfig) {
        simulators::memory::simulate_memory_use(config, &self.memory_pool);
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_run_invokes_handler_once() {
        let harness = Harness::with_seed(1);
        let config = SimulationConfig::new();
        let result = harness
            .run(
                &config,
                |params: &'static str| Box::pin(async move { Ok(params.len()) }),
                "hello",
            )
            .await
            .unwrap();
        assert_eq!(result, 5);
    }

    #[tokio::test]
    async fn handler_failure_propagates_unmodified() {
        let harness = Harness::with_seed(2);
        let config = SimulationConfig::new();
        let err = harness
            .run(
                &config,
                |_: ()| Box::pin(async { Err::<(), _>("boom".into()) }),
                (),
            )
            .await
            .unwrap_err();
        match err {
            HarnessError::Handler(source) => assert_eq!(source.to_string(), "boom"),
            other => panic!("expected handler error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn seeded_harnesses_draw_identical_delays() {
        let config = ColdStartConfig::default();
        let left = Harness::with_seed(42).simulate_cold_start(&config).await;
        let right = Harness::with_seed(42).simulate_cold_start(&config).await;
        assert_eq!(left, right);
    }

    #[test]
    fn memory_pools_are_per_harness() {
        let first = Harness::with_seed(3);
        let second = Harness::with_seed(3);
        first.simulate_memory_use(&MemoryUseConfig { size_mb: 2 });
        assert_eq!(first.memory_pool().block_count(), 2);
        assert!(second.memory_pool().is_empty());
    }

    #[test]
    fn injected_pool_is_shared() {
        let pool = Arc::new(MemoryPool::new());
        let harness = Harness::with_seed(4).with_memory_pool(pool.clone());
        harness.simulate_memory_use(&MemoryUseConfig { size_mb: 1 });
        assert_eq!(pool.block_count(), 1);
    }
}
