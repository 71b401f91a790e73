//! Concurrency-limit simulation
//!
//! Signals the platform rejecting an invocation because too many instances
//! are already running. The failure fires before the handler ever starts
//! and does not suspend.

use rand::Rng;
use tracing::info;

use crate::config::ConcurrencyLimitConfig;
use crate::error::{HarnessError, Result};

/// Fail with [`HarnessError::ConcurrencyLimitExceeded`], always or on a
/// fair coin flip.
pub fn simulate_concurrency_limit<R: Rng>(
    config: &ConcurrencyLimitConfig,
    rng: &mut R,
) -> Result<()> {
    info!(random = config.random, "applying concurrency limit");
    if config.random && rng.gen_bool(0.5) {
        return Ok(());
    }
    Err(HarnessError::ConcurrencyLimitExceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fixed_mode_always_fails() {
        let config = ConcurrencyLimitConfig { random: false };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..16 {
            let err = simulate_concurrency_limit(&config, &mut rng).unwrap_err();
            assert!(matches!(err, HarnessError::ConcurrencyLimitExceeded));
        }
    }

    #[test]
    fn random_mode_fails_on_a_nonzero_subset() {
        let config = ConcurrencyLimitConfig { random: true };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let failures = (0..200)
            .filter(|_| simulate_concurrency_limit(&config, &mut rng).is_err())
            .count();
        assert!(failures > 0, "limit never fired in 200 trials");
        assert!(failures < 200, "limit fired on every one of 200 trials");
    }
}
