//! In-memory store implementation.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use userstore_core::storage::{Page, PageToken, Result, StoreError, UserStore};
use userstore_core::user::{UserPatch, UserRecord};

/// Default number of records per scan page.
const DEFAULT_PAGE_SIZE: usize = 25;

/// In-memory storage backend for testing and local runs.
///
/// Records live in a `BTreeMap` behind `Arc<RwLock<_>>`; the ordered map
/// gives scan pagination a stable key order, with the last id of a page
/// doubling as the continuation token. Data is not persisted and is lost
/// when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    records: Arc<RwLock<BTreeMap<String, UserRecord>>>,
    page_size: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates a store that pages scans at the given size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get(&self, id: &str) -> Result<Option<UserRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn put(&self, record: &UserRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserRecord> {
        let mut records = self.records.write().await;
        let record = records.get_mut(id).ok_or_else(|| StoreError::NotFound {
            id: id.to_string(),
        })?;
        patch.apply_to(record);
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<Option<UserRecord>> {
        let mut records = self.records.write().await;
        Ok(records.remove(id))
    }

    async fn batch_put(&self, batch: &[UserRecord]) -> Result<Vec<UserRecord>> {
        let mut records = self.records.write().await;
        for record in batch {
            records.insert(record.id.clone(), record.clone());
        }
        Ok(Vec::new())
    }

    async fn query_page(&self, id: &str, _cursor: Option<PageToken>) -> Result<Page> {
        // The primary key is the only queryable key, so a query is a
        // point lookup: zero or one record, always a single page.
        let records = self.records.read().await;
        Ok(Page::last(records.get(id).cloned().into_iter().collect()))
    }

    async fn scan_page(&self, cursor: Option<PageToken>) -> Result<Page> {
        let records = self.records.read().await;

        let start = match &cursor {
            Some(token) => Bound::Excluded(token.as_str().to_string()),
            None => Bound::Unbounded,
        };

        let mut page: Vec<UserRecord> = records
            .range((start, Bound::Unbounded))
            .take(self.page_size + 1)
            .map(|(_, record)| record.clone())
            .collect();

        // The extra record only probes whether another page exists.
        let next = if page.len() > self.page_size {
            page.truncate(self.page_size);
            page.last().map(|record| PageToken::new(record.id.clone()))
        } else {
            None
        };

        Ok(Page {
            records: page,
            next,
        })
    }
}
