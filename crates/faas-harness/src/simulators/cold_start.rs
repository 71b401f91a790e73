//! Cold-start simulation
//!
//! Delays handler start to model the container spin-up a handler sees on
//! its first invocation in a fresh execution environment.

use rand::Rng;
use std::time::Duration;
use tracing::info;

use crate::config::ColdStartConfig;
use crate::delay;

/// Choose the startup delay for one invocation.
///
/// `exact` pins the delay to `max_ms`; otherwise it is drawn uniformly
/// from `[min_ms, max_ms)`. A degenerate range (`min_ms >= max_ms`) clamps
/// to `min_ms` so the draw never panics.
pub fn pick_delay_ms<R: Rng>(config: &ColdStartConfig, rng: &mut R) -> u64 {
    if config.exact {
        config.max_ms
    } else if config.min_ms >= config.max_ms {
        config.min_ms
    } else {
        rng.gen_range(config.min_ms..config.max_ms)
    }
}

/// Suspend for a configured cold-start delay and return the delay chosen.
pub async fn simulate_cold_start<R: Rng>(config: &ColdStartConfig, rng: &mut R) -> Duration {
    let delay_ms = pick_delay_ms(config, rng);
    info!(delay_ms, "delaying handler start");
    delay::delay_for(delay_ms).await
}
