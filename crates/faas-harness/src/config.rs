//! Simulation configuration
//!
//! A [`SimulationConfig`] selects which adverse conditions the harness
//! applies around a handler invocation. Presence of a sub-config (not its
//! contents) activates the corresponding simulation; an absent key skips
//! that simulation entirely. The orchestrator treats the configuration as
//! read-only input.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{HarnessError, Result};

/// Top-level selection of active simulations.
///
/// Deserializable from a scenario TOML file; each table activates one
/// simulation, with omitted fields falling back to the documented
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Fail before the handler runs, deterministically or on a coin flip.
    pub concurrency_limit: Option<ConcurrencyLimitConfig>,
    /// Delay handler start to model container cold start.
    pub cold_start: Option<ColdStartConfig>,
    /// Suspend long enough to trip an external execution-time limit.
    pub timeout: Option<TimeoutConfig>,
    /// Fill the on-disk cache location before the handler runs.
    pub cache_use: Option<CacheUseConfig>,
    /// Grow the resident memory footprint before the handler runs.
    pub memory_use: Option<MemoryUseConfig>,
    /// Invoke the handler repeatedly, keeping only the last result.
    pub retries: Option<RetriesConfig>,
}

impl SimulationConfig {
    /// Empty configuration: no simulations active, handler runs once.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a scenario from TOML.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| HarnessError::Config(err.to_string()))
    }

    /// Activate the concurrency-limit simulation.
    pub fn with_concurrency_limit(mut self, config: ConcurrencyLimitConfig) -> Self {
        self.concurrency_limit = Some(config);
        self
    }

    /// Activate the cold-start simulation.
    pub fn with_cold_start(mut self, config: ColdStartConfig) -> Self {
        self.cold_start = Some(config);
        self
    }

    /// Activate the timeout simulation.
    pub fn with_timeout(mut self, config: TimeoutConfig) -> Self {
        self.timeout = Some(config);
        self
    }

    /// Activate the cache-use simulation.
    pub fn with_cache_use(mut self, config: CacheUseConfig) -> Self {
        self.cache_use = Some(config);
        self
    }

    /// Activate the memory-use simulation.
    pub fn with_memory_use(mut self, config: MemoryUseConfig) -> Self {
        self.memory_use = Some(config);
        self
    }

    /// Activate the retry simulation.
    pub fn with_retries(mut self, config: RetriesConfig) -> Self {
        self.retries = Some(config);
        self
    }
}

/// Cold-start simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColdStartConfig {
    /// Maximum startup delay in milliseconds.
    #[serde(default = "default_cold_start_max_ms")]
    pub max_ms: u64,
    /// Minimum startup delay in milliseconds.
    #[serde(default)]
    pub min_ms: u64,
    /// Delay exactly `max_ms` instead of drawing from `[min_ms, max_ms)`.
    #[serde(default)]
    pub exact: bool,
}

impl Default for ColdStartConfig {
    fn default() -> Self {
        Self {
            max_ms: default_cold_start_max_ms(),
            min_ms: 0,
            exact: false,
        }
    }
}

/// Timeout simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Suspension length in minutes. Fractional values are honored.
    #[serde(default = "default_timeout_in_minutes")]
    pub timeout_in_minutes: f64,
    /// Flip a fair coin: half the runs return immediately instead of
    /// suspending.
    #[serde(default)]
    pub random: bool,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            timeout_in_minutes: default_timeout_in_minutes(),
            random: false,
        }
    }
}

/// Retry simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetriesConfig {
    /// Total number of handler invocations. Must be at least 1.
    #[serde(default = "default_retry_count")]
    pub retries: u32,
}

impl Default for RetriesConfig {
    fn default() -> Self {
        Self {
            retries: default_retry_count(),
        }
    }
}

/// Concurrency-limit simulation parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConcurrencyLimitConfig {
    /// Flip a fair coin: half the runs proceed instead of failing.
    #[serde(default)]
    pub random: bool,
}

/// Cache-use simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheUseConfig {
    /// Megabytes of filler to write to the cache file.
    #[serde(default)]
    pub size_mb: u64,
    /// Directory holding the cache file.
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

impl Default for CacheUseConfig {
    fn default() -> Self {
        Self {
            size_mb: 0,
            dir: default_cache_dir(),
        }
    }
}

/// Memory-use simulation parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryUseConfig {
    /// Megabytes of heap to allocate and retain.
    #[serde(default)]
    pub size_mb: u64,
}

fn default_cold_start_max_ms() -> u64 {
    2_000
}

fn default_timeout_in_minutes() -> f64 {
    20.0
}

fn default_retry_count() -> u32 {
    3
}

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir()
}
