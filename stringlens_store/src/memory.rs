use std::collections::HashMap;

use async_trait::async_trait;
use stringlens_core::{Error, FilterSet, Result, StoredString, StringRepo};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug)]
struct Slot {
    seq: u64,
    record: StoredString,
}

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, Slot>,
    next_seq: u64,
}

impl Inner {
    fn ordered(&self) -> Vec<&StoredString> {
        let mut slots: Vec<&Slot> = self.records.values().collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| &s.record).collect()
    }
}

/// Map-backed [`StringRepo`] keyed by content hash.
///
/// Listing returns records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StringRepo for MemoryStore {
    async fn insert(&self, record: StoredString) -> Result<StoredString> {
        let mut inner = self.inner.write().await;
        if inner.records.contains_key(&record.id) {
            return Err(Error::Duplicate(record.id));
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(
            record.id.clone(),
            Slot {
                seq,
                record: record.clone(),
            },
        );

        info!("Stored string {} ({} chars)", record.id, record.properties.length);
        Ok(record)
    }

    async fn exists(&self, hash: &str) -> Result<bool> {
        Ok(self.inner.read().await.records.contains_key(hash))
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<StoredString>> {
        Ok(self
            .inner
            .read()
            .await
            .records
            .get(hash)
            .map(|s| s.record.clone()))
    }

    async fn delete(&self, hash: &str) -> Result<bool> {
        let removed = self.inner.write().await.records.remove(hash).is_some();
        if removed {
            info!("Deleted string {hash}");
        }
        Ok(removed)
    }

    async fn list_all(&self) -> Result<Vec<StoredString>> {
        Ok(self
            .inner
            .read()
            .await
            .ordered()
            .into_iter()
            .cloned()
            .collect())
    }

    async fn filter(&self, filters: &FilterSet) -> Result<Vec<StoredString>> {
        Ok(self
            .inner
            .read()
            .await
            .ordered()
            .into_iter()
            .filter(|r| filters.matches(r))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.records.len())
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use stringlens_core::content_hash;

    async fn seeded(values: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for v in values {
            store
                .insert(StoredString::new(*v))
                .await
                .expect("insert should succeed");
        }
        store
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = seeded(&["racecar"]).await;

        let hash = content_hash("racecar");
        assert!(store.exists(&hash).await.expect("exists"));

        let found = store
            .find_by_hash(&hash)
            .await
            .expect("lookup")
            .expect("record should be present");
        assert_eq!(found.value, "racecar");
        assert!(found.properties.is_palindrome);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = seeded(&["hello"]).await;

        let result = store.insert(StoredString::new("hello")).await;
        assert!(matches!(result, Err(Error::Duplicate(id)) if id == content_hash("hello")));
        assert_eq!(store.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn duplicate_keeps_original_timestamp() {
        let store = MemoryStore::new();
        let first = Utc::now() - Duration::hours(1);
        store
            .insert(StoredString::with_timestamp("hello", first))
            .await
            .expect("insert should succeed");

        let _ = store.insert(StoredString::new("hello")).await;

        let found = store
            .find_by_hash(&content_hash("hello"))
            .await
            .expect("lookup")
            .expect("record should be present");
        assert_eq!(found.created_at, first);
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let store = seeded(&["hello"]).await;
        let hash = content_hash("hello");

        assert!(store.delete(&hash).await.expect("delete"));
        assert!(!store.delete(&hash).await.expect("delete"));
        assert!(store.find_by_hash(&hash).await.expect("lookup").is_none());
        assert_eq!(store.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = seeded(&["zebra", "apple", "mango"]).await;
        store
            .delete(&content_hash("apple"))
            .await
            .expect("delete");
        store
            .insert(StoredString::new("apple"))
            .await
            .expect("insert should succeed");

        let values: Vec<_> = store
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(values, ["zebra", "mango", "apple"]);
    }

    #[tokio::test]
    async fn filter_applies_every_predicate() {
        let store = seeded(&["racecar", "noon", "hello world", "a man a plan"]).await;

        let palindromes = store
            .filter(&FilterSet {
                is_palindrome: Some(true),
                ..FilterSet::default()
            })
            .await
            .expect("filter");
        let values: Vec<_> = palindromes.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, ["racecar", "noon"]);

        let long_palindromes = store
            .filter(&FilterSet {
                is_palindrome: Some(true),
                min_length: Some(5),
                ..FilterSet::default()
            })
            .await
            .expect("filter");
        assert_eq!(long_palindromes.len(), 1);

        let two_words = store
            .filter(&FilterSet {
                word_count: Some(2),
                contains_character: Some('w'),
                ..FilterSet::default()
            })
            .await
            .expect("filter");
        assert_eq!(two_words.len(), 1);
        assert_eq!(two_words[0].value, "hello world");
    }

    #[tokio::test]
    async fn empty_filter_returns_everything() {
        let store = seeded(&["one", "two"]).await;
        let all = store.filter(&FilterSet::default()).await.expect("filter");
        assert_eq!(all.len(), 2);
    }
}
