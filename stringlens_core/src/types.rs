use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer;

/// Descriptive properties computed for a stored string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of Unicode scalar values, so `"é"` has length 1.
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: BTreeMap<char, usize>,
}

/// A string record as held by the store.
///
/// Records are immutable once created; the id is the content hash of `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredString {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl StoredString {
    /// Analyze `value` and build a new record stamped with the current time.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_timestamp(value, Utc::now())
    }

    #[must_use]
    pub fn with_timestamp(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = analyzer::analyze(&value);
        Self {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at,
        }
    }
}
