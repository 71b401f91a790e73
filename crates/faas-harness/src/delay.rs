//! Timed delay primitive

use std::time::Duration;

/// Suspend for `ms` milliseconds and return the duration as evidence of
/// completion. A zero delay resolves immediately without yielding to the
/// timer.
pub async fn delay_for(ms: u64) -> Duration {
    let duration = Duration::from_millis(ms);
    if ms > 0 {
        tokio::time::sleep(duration).await;
    }
    duration
}
