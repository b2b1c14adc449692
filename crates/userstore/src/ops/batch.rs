//! Batch write engine.
//!
//! Splits a bulk insert into store-sized chunks and drives each chunk
//! to completion. The store may report a subset of a chunk as
//! unprocessed; only that subset is resubmitted, with exponential
//! backoff, so already-confirmed records are never written twice.

use userstore_core::storage::{StoreError, UserStore};
use userstore_core::user::{OpError, UserRecord};

use crate::config::Config;
use crate::ops::retry::{self, MAX_RETRIES, RETRY_BASE_DELAY};

/// Per-call item ceiling of the store's batch write.
pub const MAX_BATCH_SIZE: usize = 25;

/// Persists all records, chunking as needed.
///
/// On full success, returns the written records. When the retry budget
/// leaves items unprocessed, every other record is still durable and the
/// failure names exactly the ids that are not; the caller can resubmit
/// just those.
pub async fn write_all<S>(
    store: &S,
    config: &Config,
    records: Vec<UserRecord>,
) -> Result<Vec<UserRecord>, OpError>
where
    S: UserStore + ?Sized,
{
    let mut written = 0usize;
    let mut unprocessed = Vec::new();

    for chunk in records.chunks(MAX_BATCH_SIZE) {
        let leftover = write_chunk(store, config, chunk).await?;
        written += chunk.len() - leftover.len();
        unprocessed.extend(leftover.into_iter().map(|record| record.id));
    }

    if unprocessed.is_empty() {
        Ok(records)
    } else {
        Err(OpError::PartialWrite {
            written,
            unprocessed,
        })
    }
}

/// Submits one chunk, resubmitting the store-reported unprocessed
/// subset until it drains or the retry budget runs out. Returns the
/// records that never made it.
async fn write_chunk<S>(
    store: &S,
    config: &Config,
    chunk: &[UserRecord],
) -> Result<Vec<UserRecord>, StoreError>
where
    S: UserStore + ?Sized,
{
    let mut pending = chunk.to_vec();
    let mut delay = RETRY_BASE_DELAY;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        pending = retry::with_retry(config, || store.batch_put(&pending)).await?;
        if pending.is_empty() {
            return Ok(pending);
        }

        tracing::warn!(
            unprocessed = pending.len(),
            attempt,
            "store reported unprocessed batch items"
        );
    }

    Ok(pending)
}
