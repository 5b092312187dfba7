//! Filter predicate sets applied over stored strings.

use serde::{Deserialize, Serialize};

use crate::types::StoredString;

/// A conjunction of optional predicates over a [`StoredString`].
///
/// Bounds are signed: the natural-language parser may produce an
/// unsatisfiable bound such as `max_length = -1`, which simply matches
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterSet {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Check whether `record` satisfies every present predicate.
    #[must_use]
    pub fn matches(&self, record: &StoredString) -> bool {
        let props = &record.properties;
        let length = to_i64(props.length);

        self.is_palindrome.is_none_or(|p| props.is_palindrome == p)
            && self.min_length.is_none_or(|min| length >= min)
            && self.max_length.is_none_or(|max| length <= max)
            && self
                .word_count
                .is_none_or(|count| to_i64(props.word_count) == count)
            && self
                .contains_character
                .is_none_or(|c| record.value.contains(c))
    }

    /// Whether both length bounds are set and cannot be satisfied together.
    #[must_use]
    pub const fn has_inverted_length_bounds(&self) -> bool {
        matches!((self.min_length, self.max_length), (Some(min), Some(max)) if min > max)
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
