//! FaaS fault-injection harness
//!
//! Wraps an arbitrary async handler invocation with configurable synthetic
//! adverse conditions so a handler's resilience under resource-constrained
//! or unreliable execution environments can be exercised deterministically
//! or probabilistically:
//!
//! - startup latency (cold start)
//! - forced timeout
//! - forced failure (concurrency limit)
//! - automatic retries
//! - disk-cache pressure
//! - memory pressure
//!
//! The [`Harness`] orchestrates the active simulations in a fixed order
//! around the handler; each simulator is also independently invocable.
//!
//! # Example
//!
//! ```rust,ignore
//! use faas_harness::{ColdStartConfig, Harness, SimulationConfig};
//!
//! let harness = Harness::with_seed(42);
//! let config = SimulationConfig::new().with_cold_start(ColdStartConfig {
//!     max_ms: 234,
//!     min_ms: 20,
//!     exact: true,
//! });
//!
//! let result = harness
//!     .run(&config, |name: String| Box::pin(async move { Ok(name.len()) }), "demo".to_string())
//!     .await?;
//! ```

pub mod config;
pub mod delay;
pub mod error;
pub mod harness;
pub mod memory_pool;
pub mod payload;
pub mod simulators;

pub use config::{
    CacheUseConfig, ColdStartConfig, ConcurrencyLimitConfig, MemoryUseConfig, RetriesConfig,
    SimulationConfig, TimeoutConfig,
};
pub use error::{HandlerError, HarnessError, Result};
pub use harness::{invoke_handler, Harness};
pub use memory_pool::MemoryPool;
