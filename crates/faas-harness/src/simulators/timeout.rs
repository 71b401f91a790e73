//! Timeout simulation
//!
//! Suspends long enough that an external execution-time limit would fire.
//! The simulator itself never raises a failure; a genuine timeout is
//! enforced by the platform the handler runs on, not by the harness.

use rand::Rng;
use std::time::Duration;
use tracing::info;

use crate::config::TimeoutConfig;
use crate::delay;

/// Decide how long this invocation suspends.
///
/// Returns `None` when `random` is set and the coin lands on the
/// transient-success side; otherwise the full configured duration in
/// milliseconds. Fractional minutes are honored.
pub fn pick_suspension_ms<R: Rng>(config: &TimeoutConfig, rng: &mut R) -> Option<u64> {
    if config.random && rng.gen_bool(0.5) {
        return None;
    }
    Some((config.timeout_in_minutes * 60_000.0).round() as u64)
}

/// Apply the timeout simulation, returning the elapsed suspension if one
/// happened.
pub async fn simulate_timeout<R: Rng>(config: &TimeoutConfig, rng: &mut R) -> Option<Duration> {
    info!(
        timeout_in_minutes = config.timeout_in_minutes,
        random = config.random,
        "forcing handler timeout"
    );
    match pick_suspension_ms(config, rng) {
        Some(ms) => Some(delay::delay_for(ms).await),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fixed_mode_always_suspends_full_duration() {
        let config = TimeoutConfig {
            timeout_in_minutes: 0.1,
            random: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..16 {
            assert_eq!(pick_suspension_ms(&config, &mut rng), Some(6_000));
        }
    }

    #[test]
    fn random_mode_is_all_or_nothing() {
        let config = TimeoutConfig {
            timeout_in_minutes: 2.0,
            random: true,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut skipped = 0usize;
        let mut suspended = 0usize;
        for _ in 0..200 {
            match pick_suspension_ms(&config, &mut rng) {
                None => skipped += 1,
                Some(ms) => {
                    assert_eq!(ms, 120_000);
                    suspended += 1;
                }
            }
        }
        assert!(skipped > 0, "coin never skipped in 200 draws");
        assert!(suspended > 0, "coin never suspended in 200 draws");
    }

    #[tokio::test(start_paused = true)]
    async fn default_timeout_suspends_twenty_minutes() {
        let started = tokio::time::Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let elapsed = simulate_timeout(&TimeoutConfig::default(), &mut rng).await;
        assert_eq!(elapsed, Some(Duration::from_millis(1_200_000)));
        assert_eq!(started.elapsed(), Duration::from_millis(1_200_000));
    }
}
