//! Timeout and transient-retry guard for store calls.
//!
//! Every store interaction goes through [`with_retry`]: the call is
//! bounded by the configured timeout, and throttling rejections are
//! retried with exponential backoff before counting as unavailability.
//! A timeout is fatal immediately; the invocation has no budget to wait
//! out a stalled store.

use std::future::Future;
use std::time::Duration;

use userstore_core::storage::StoreError;

use crate::config::Config;

/// First backoff delay; doubles on every retry.
pub(crate) const RETRY_BASE_DELAY: Duration = Duration::from_millis(50);

/// Retries after the initial attempt.
pub(crate) const MAX_RETRIES: u32 = 5;

/// Runs a store call with a bounded timeout, retrying throttled
/// rejections with exponential backoff.
pub async fn with_retry<T, F, Fut>(config: &Config, mut call: F) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut delay = RETRY_BASE_DELAY;
    let mut attempt = 0;

    loop {
        match tokio::time::timeout(config.store_timeout(), call()).await {
            Err(_) => {
                return Err(StoreError::Unavailable(format!(
                    "store call timed out after {}ms",
                    config.store_timeout_ms
                )));
            }
            Ok(Err(StoreError::Throttled(message))) if attempt < MAX_RETRIES => {
                attempt += 1;
                tracing::warn!(attempt, %message, "store throttled, backing off");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Ok(Err(StoreError::Throttled(message))) => {
                return Err(StoreError::Unavailable(format!(
                    "still throttled after {MAX_RETRIES} retries: {message}"
                )));
            }
            Ok(result) => return result,
        }
    }
}
