use async_trait::async_trait;

use crate::error::Result;
use crate::filter::FilterSet;
use crate::types::StoredString;

/// Storage contract for analyzed strings, keyed by content hash.
#[async_trait]
pub trait StringRepo: Send + Sync {
    /// Insert a new record. Fails with [`crate::Error::Duplicate`] when a
    /// record with the same id is already present.
    async fn insert(&self, record: StoredString) -> Result<StoredString>;

    async fn exists(&self, hash: &str) -> Result<bool>;

    async fn find_by_hash(&self, hash: &str) -> Result<Option<StoredString>>;

    /// Returns `true` when a record was removed.
    async fn delete(&self, hash: &str) -> Result<bool>;

    async fn list_all(&self) -> Result<Vec<StoredString>>;

    async fn filter(&self, filters: &FilterSet) -> Result<Vec<StoredString>> {
        let all = self.list_all().await?;
        Ok(all.into_iter().filter(|r| filters.matches(r)).collect())
    }

    async fn count(&self) -> Result<usize>;
}
