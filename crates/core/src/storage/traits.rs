use async_trait::async_trait;

use crate::user::{UserPatch, UserRecord};

use super::{Page, PageToken, Result};

/// The narrow port a store backend implements.
///
/// This is the full capability set the dispatcher needs: point
/// operations by primary key, a bounded batch write, and paged
/// query/scan. Chunking, retry, and pagination live above this trait so
/// backends stay thin.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetches a record by id. Absence is not an error.
    async fn get(&self, id: &str) -> Result<Option<UserRecord>>;

    /// Writes a record, replacing any previous record with the same id.
    async fn put(&self, record: &UserRecord) -> Result<()>;

    /// Applies a partial update to an existing record and returns the
    /// post-update state. Fails with `StoreError::NotFound` when no
    /// record has the id; update never creates.
    async fn update(&self, id: &str, patch: &UserPatch) -> Result<UserRecord>;

    /// Removes a record, returning the previous state when one existed.
    /// Deleting an absent id succeeds with `None`.
    async fn delete(&self, id: &str) -> Result<Option<UserRecord>>;

    /// Writes up to one store batch of records (the caller enforces the
    /// batch ceiling) and returns the subset the store reported as
    /// unprocessed. An empty return means the whole batch is durable.
    async fn batch_put(&self, records: &[UserRecord]) -> Result<Vec<UserRecord>>;

    /// Fetches one page of records matching the primary key.
    async fn query_page(&self, id: &str, cursor: Option<PageToken>) -> Result<Page>;

    /// Fetches one page of the full table scan.
    async fn scan_page(&self, cursor: Option<PageToken>) -> Result<Page>;
}
