//! Retry simulation
//!
//! Models a platform that automatically re-invokes a handler: the handler
//! runs a fixed number of times in sequence and only the final result is
//! returned to the caller. A failure on any iteration propagates
//! immediately instead of being swallowed, so an intermediate invocation
//! can still abort the whole run.

use futures::future::BoxFuture;
use tracing::info;

use crate::error::{HandlerError, HarnessError, Result};
use crate::harness::invoke_handler;

/// Invoke `handler` exactly `retry_count` times, discarding every result
/// but the last. `retry_count` of 1 is a plain single invocation.
pub async fn simulate_retries<F, P, T>(
    retry_count: u32,
    handler: &mut F,
    params: &P,
) -> Result<T>
where
    F: FnMut(P) -> BoxFuture<'static, std::result::Result<T, HandlerError>>,
    P: Clone,
{
    if retry_count == 0 {
        return Err(HarnessError::Config(
            "retries must be at least 1".to_string(),
        ));
    }

    info!(retry_count, "re-running handler, keeping the final result");

    for _ in 0..retry_count - 1 {
        invoke_handler(handler, params).await?;
    }
    invoke_handler(handler, params).await
}
