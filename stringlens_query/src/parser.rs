//! Query parser: runs the rule groups and checks the result for conflicts.

use std::sync::OnceLock;

use serde::{Serialize, Serializer};
use stringlens_core::FilterSet;
use thiserror::Error;
use tracing::debug;

use crate::rules::{RuleGroup, default_rules};

/// A logically unsatisfiable combination of extracted filters.
///
/// Conflicts do not fail the parse; callers decide whether to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// `min_length` is greater than `max_length`.
    InvertedLengthBounds,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvertedLengthBounds => write!(f, "min_length is greater than max_length"),
        }
    }
}

impl Serialize for Conflict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a query could not be turned into filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("no valid filters extracted from the query")]
    NoFilters,
}

/// A successfully interpreted query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    pub filters: FilterSet,

    /// Detected conflicts, in detection order. Empty when the filters are
    /// satisfiable.
    pub conflicts: Vec<Conflict>,

    /// Ids of the rules that fired, in evaluation order.
    pub rules: Vec<&'static str>,
}

impl ParsedQuery {
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Rule-based natural-language filter parser.
///
/// Stateless once built: `parse` takes `&self` and is safe to share across
/// request handlers.
#[derive(Debug)]
pub struct QueryParser {
    groups: Vec<RuleGroup>,
}

impl QueryParser {
    #[must_use]
    pub const fn new(groups: Vec<RuleGroup>) -> Self {
        Self { groups }
    }

    /// Build a parser with the built-in rule set.
    ///
    /// # Errors
    /// Returns an error if a built-in pattern fails to compile.
    pub fn with_defaults() -> Result<Self, regex::Error> {
        Ok(Self::new(default_rules()?))
    }

    #[must_use]
    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Interpret `query` as a filter set.
    ///
    /// # Errors
    /// Returns [`ParseError::EmptyQuery`] for blank input and
    /// [`ParseError::NoFilters`] when no rule fires.
    pub fn parse(&self, query: &str) -> Result<ParsedQuery, ParseError> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ParseError::EmptyQuery);
        }

        let mut filters = FilterSet::default();
        let mut rules = Vec::new();
        for group in &self.groups {
            group.evaluate(&normalized, &mut filters, &mut rules);
        }

        if filters.is_empty() {
            debug!("no filters extracted from {normalized:?}");
            return Err(ParseError::NoFilters);
        }

        let mut conflicts = Vec::new();
        if filters.has_inverted_length_bounds() {
            conflicts.push(Conflict::InvertedLengthBounds);
        }

        Ok(ParsedQuery {
            filters,
            conflicts,
            rules,
        })
    }
}

static DEFAULT_PARSER: OnceLock<QueryParser> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Built-in regex patterns are covered by tests"
)]
fn default_parser() -> &'static QueryParser {
    DEFAULT_PARSER.get_or_init(|| {
        QueryParser::with_defaults().expect("Built-in query patterns are guaranteed to be valid")
    })
}

/// Parse `query` with the built-in rule set.
///
/// # Errors
/// See [`QueryParser::parse`].
pub fn parse(query: &str) -> Result<ParsedQuery, ParseError> {
    default_parser().parse(query)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test failure should panic with context")]
mod tests {
    use super::*;
    use stringlens_core::StoredString;

    fn filters(query: &str) -> FilterSet {
        parse(query).expect("query should parse").filters
    }

    #[test]
    fn single_word() {
        let parsed = parse("single word").expect("query should parse");
        assert_eq!(
            parsed.filters,
            FilterSet {
                word_count: Some(1),
                ..FilterSet::default()
            }
        );
        assert!(parsed.conflicts.is_empty());
    }

    #[test]
    fn palindrome_with_minimum_length() {
        assert_eq!(
            filters("a palindrome with at least 5 characters"),
            FilterSet {
                is_palindrome: Some(true),
                min_length: Some(5),
                ..FilterSet::default()
            }
        );
    }

    #[test]
    fn single_word_palindromic_strings() {
        let parsed = parse("all single word palindromic strings").expect("query should parse");
        assert_eq!(parsed.filters.is_palindrome, Some(true));
        assert_eq!(parsed.filters.word_count, Some(1));
        assert_eq!(parsed.rules, ["palindrome", "single_word"]);
    }

    #[test]
    fn inverted_bounds_are_flagged_not_rejected() {
        let parsed = parse("longer than 10 and shorter than 5").expect("query should parse");
        assert_eq!(parsed.filters.min_length, Some(11));
        assert_eq!(parsed.filters.max_length, Some(4));
        assert!(parsed.has_conflicts());
        assert_eq!(
            parsed
                .conflicts
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["min_length is greater than max_length"]
        );
    }

    #[test]
    fn containing_the_letter() {
        assert_eq!(
            filters("containing the letter z"),
            FilterSet {
                contains_character: Some('z'),
                ..FilterSet::default()
            }
        );
        assert_eq!(
            filters("strings with character q").contains_character,
            Some('q')
        );
        assert_eq!(
            filters("words that contain the letter k").contains_character,
            Some('k')
        );
    }

    #[test]
    fn bare_containing_letter() {
        let parsed = parse("strings containing z").expect("query should parse");
        assert_eq!(parsed.filters.contains_character, Some('z'));
        assert_eq!(parsed.rules, ["containing"]);
    }

    #[test]
    fn letter_phrase_takes_priority_over_bare_phrase() {
        let parsed = parse("containing the letter b").expect("query should parse");
        assert_eq!(parsed.rules, ["contains_letter"]);
    }

    #[test]
    fn multi_letter_containment_is_not_extracted() {
        assert_eq!(parse("containing xyz"), Err(ParseError::NoFilters));
    }

    #[test]
    fn exactly_sets_both_bounds() {
        assert_eq!(
            filters("exactly 7 characters"),
            FilterSet {
                min_length: Some(7),
                max_length: Some(7),
                ..FilterSet::default()
            }
        );
    }

    #[test]
    fn exactly_overrides_other_length_phrases() {
        let f = filters("longer than 3 exactly 5");
        assert_eq!(f.min_length, Some(5));
        assert_eq!(f.max_length, Some(5));
    }

    #[test]
    fn shorter_than_zero_yields_negative_bound() {
        let parsed = parse("shorter than 0").expect("query should parse");
        assert_eq!(
            parsed.filters,
            FilterSet {
                max_length: Some(-1),
                ..FilterSet::default()
            }
        );
        assert!(parsed.conflicts.is_empty());
    }

    #[test]
    fn strict_bounds_become_inclusive() {
        let f = filters("strings longer than 10 characters");
        assert_eq!(f.min_length, Some(11));
        assert_eq!(f.max_length, None);

        let f = filters("more than 2 characters but less than 9 characters");
        assert_eq!(f.min_length, Some(3));
        assert_eq!(f.max_length, Some(8));
    }

    #[test]
    fn at_least_and_at_most() {
        let f = filters("at least 2 and at most 6 characters");
        assert_eq!(f.min_length, Some(2));
        assert_eq!(f.max_length, Some(6));
    }

    #[test]
    fn word_count_phrases() {
        assert_eq!(filters("two words").word_count, Some(2));
        assert_eq!(filters("three word phrases").word_count, Some(3));
        assert_eq!(filters("strings with 5 words").word_count, Some(5));
        assert_eq!(filters("1 word").word_count, Some(1));
    }

    #[test]
    fn first_word_count_phrase_wins() {
        assert_eq!(filters("one word and 3 words").word_count, Some(1));
        assert_eq!(filters("two words or three words").word_count, Some(2));
    }

    #[test]
    fn ordinal_vowels() {
        assert_eq!(
            filters("strings that contain the first vowel").contains_character,
            Some('a')
        );
        assert_eq!(filters("second vowel").contains_character, Some('e'));
        assert_eq!(filters("third vowel").contains_character, Some('i'));
        assert_eq!(filters("fourth vowel").contains_character, Some('o'));
        assert_eq!(filters("fifth vowel").contains_character, Some('u'));
    }

    #[test]
    fn last_listed_ordinal_vowel_wins() {
        assert_eq!(
            filters("first vowel and fifth vowel").contains_character,
            Some('u')
        );
        assert_eq!(
            filters("containing the letter z and the second vowel").contains_character,
            Some('e')
        );
    }

    #[test]
    fn categories_combine() {
        let f = filters("palindromes of two words containing the letter a longer than 4");
        assert_eq!(
            f,
            FilterSet {
                is_palindrome: Some(true),
                min_length: Some(5),
                word_count: Some(2),
                contains_character: Some('a'),
                ..FilterSet::default()
            }
        );
    }

    #[test]
    fn input_is_normalized() {
        assert_eq!(filters("  PALINDROMES  ").is_palindrome, Some(true));
        assert_eq!(filters("Single Word").word_count, Some(1));
    }

    #[test]
    fn blank_query_fails() {
        assert_eq!(parse(""), Err(ParseError::EmptyQuery));
        assert_eq!(parse("   \t\n"), Err(ParseError::EmptyQuery));
    }

    #[test]
    fn unrecognized_query_fails() {
        assert_eq!(parse("hello world"), Err(ParseError::NoFilters));
        assert_eq!(parse("show me everything"), Err(ParseError::NoFilters));
        assert_eq!(
            ParseError::NoFilters.to_string(),
            "no valid filters extracted from the query"
        );
    }

    #[test]
    fn oversized_number_clamps_bound() {
        let longer = filters("palindromes longer than 99999999999999999999 characters");
        assert_eq!(longer.is_palindrome, Some(true));
        assert_eq!(longer.min_length, Some(i64::MAX));
        assert!(!longer.matches(&StoredString::new("racecar")));

        let exactly = filters("exactly 99999999999999999999 characters");
        assert_eq!(exactly.min_length, Some(i64::MAX));
        assert_eq!(exactly.max_length, Some(i64::MAX));
        assert!(!exactly.matches(&StoredString::new("abc")));
    }

    #[test]
    fn parsing_is_deterministic() {
        let query = "palindromes with exactly 3 characters containing the letter a";
        assert_eq!(parse(query), parse(query));
    }

    #[test]
    fn explicit_parser_matches_default() {
        let parser = QueryParser::with_defaults().expect("built-in patterns should compile");
        assert_eq!(parser.groups().len(), 5);
        assert_eq!(parser.parse("single word"), parse("single word"));
    }

    #[test]
    fn serializes_conflicts_as_strings() {
        let parsed = parse("at least 9 and at most 2").expect("query should parse");
        let json = serde_json::to_value(&parsed).expect("parsed query should serialize");

        assert_eq!(json["conflicts"][0], "min_length is greater than max_length");
        assert_eq!(json["filters"]["min_length"], 9);
        assert_eq!(json["filters"]["max_length"], 2);
    }
}
