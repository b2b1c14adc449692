//! Query/scan pagination.
//!
//! The store returns results one page at a time with an optional
//! continuation token. These loops follow the token chain until it ends,
//! either accumulating the records or just counting them, so an
//! arbitrarily large table never has to fit in a single store call.
//! Any page failure aborts the whole read; accumulated partial results
//! are discarded.

use userstore_core::storage::{PageToken, UserStore};
use userstore_core::user::{OpError, UserRecord};

use crate::config::Config;
use crate::ops::retry;

/// Collects every record matching the primary key.
pub async fn collect_query<S>(
    store: &S,
    config: &Config,
    id: &str,
) -> Result<Vec<UserRecord>, OpError>
where
    S: UserStore + ?Sized,
{
    let mut records = Vec::new();
    let mut cursor: Option<PageToken> = None;

    loop {
        let page = retry::with_retry(config, || store.query_page(id, cursor.clone())).await?;
        records.extend(page.records);
        match page.next {
            Some(next) => cursor = Some(next),
            None => return Ok(records),
        }
    }
}

/// Collects every record in the table.
pub async fn collect_scan<S>(store: &S, config: &Config) -> Result<Vec<UserRecord>, OpError>
where
    S: UserStore + ?Sized,
{
    let mut records = Vec::new();
    let mut cursor: Option<PageToken> = None;

    loop {
        let page = retry::with_retry(config, || store.scan_page(cursor.clone())).await?;
        records.extend(page.records);
        match page.next {
            Some(next) => cursor = Some(next),
            None => return Ok(records),
        }
    }
}

/// Counts every record in the table, discarding the bodies.
pub async fn count_scan<S>(store: &S, config: &Config) -> Result<u64, OpError>
where
    S: UserStore + ?Sized,
{
    let mut count = 0u64;
    let mut cursor: Option<PageToken> = None;

    loop {
        let page = retry::with_retry(config, || store.scan_page(cursor.clone())).await?;
        count += page.records.len() as u64;
        match page.next {
            Some(next) => cursor = Some(next),
            None => return Ok(count),
        }
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use userstore_core::user::sample;

    use super::*;
    use crate::storage::inmemory::InMemoryStore;

    fn test_config() -> Config {
        Config {
            table_name: "users".to_string(),
            store_timeout_ms: 1_000,
        }
    }

    #[tokio::test]
    async fn test_scan_crosses_page_boundaries() {
        // Page size 10 forces 7 pages for 64 records.
        let store = InMemoryStore::with_page_size(10);
        for record in sample::synthetic_users(64) {
            store.put(&record).await.unwrap();
        }

        let records = collect_scan(&store, &test_config()).await.unwrap();
        assert_eq!(records.len(), 64);

        let count = count_scan(&store, &test_config()).await.unwrap();
        assert_eq!(count, 64);
    }

    #[tokio::test]
    async fn test_scan_exact_page_multiple() {
        // 30 records at page size 10: the last page must terminate the
        // token chain even though it is full.
        let store = InMemoryStore::with_page_size(10);
        for record in sample::synthetic_users(30) {
            store.put(&record).await.unwrap();
        }

        assert_eq!(count_scan(&store, &test_config()).await.unwrap(), 30);
    }

    #[tokio::test]
    async fn test_empty_table() {
        let store = InMemoryStore::new();

        assert!(collect_scan(&store, &test_config()).await.unwrap().is_empty());
        assert_eq!(count_scan(&store, &test_config()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_query_point_semantics() {
        let store = InMemoryStore::new();
        let record = sample::synthetic_users(1).remove(0);
        store.put(&record).await.unwrap();

        let hits = collect_query(&store, &test_config(), &record.id)
            .await
            .unwrap();
        assert_eq!(hits, vec![record]);

        // Absence is a valid empty result, not an error.
        let misses = collect_query(&store, &test_config(), "no-such-id")
            .await
            .unwrap();
        assert!(misses.is_empty());
    }
}
