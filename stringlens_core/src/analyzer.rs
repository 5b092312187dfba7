//! String property analysis and content hashing.

use std::collections::{BTreeMap, HashSet};

use sha2::{Digest, Sha256};

use crate::types::StringProperties;

/// Compute the SHA-256 content hash of a value.
///
/// The hex-encoded digest doubles as the record id in the store.
#[must_use]
pub fn content_hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compute every descriptive property of `value`.
///
/// Lengths and character counts are measured in Unicode scalar values.
#[must_use]
pub fn analyze(value: &str) -> StringProperties {
    StringProperties {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_characters(value),
        word_count: word_count(value),
        sha256_hash: content_hash(value),
        character_frequency_map: character_frequency(value),
    }
}

/// Case-insensitive palindrome check. The empty string is a palindrome.
#[must_use]
pub fn is_palindrome(value: &str) -> bool {
    let normalized: Vec<char> = value.to_lowercase().chars().collect();
    normalized.iter().eq(normalized.iter().rev())
}

#[must_use]
pub fn unique_characters(value: &str) -> usize {
    value.chars().collect::<HashSet<_>>().len()
}

#[must_use]
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

#[must_use]
pub fn character_frequency(value: &str) -> BTreeMap<char, usize> {
    let mut frequency = BTreeMap::new();
    for c in value.chars() {
        *frequency.entry(c).or_insert(0) += 1;
    }
    frequency
}
