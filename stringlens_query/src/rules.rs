//! Ordered extraction rules for natural-language queries.
//!
//! Rules are grouped by the filter category they write. Groups run in a fixed
//! order, and within a group the rule order is significant: reordering changes
//! the outcome of ambiguous queries such as "one word and 3 words".

use regex::{Captures, Regex};
use stringlens_core::FilterSet;
use tracing::debug;

/// The filter category a rule writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    IsPalindrome,
    WordCount,
    Length,
    ContainsCharacter,
}

impl FilterField {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::IsPalindrome => "is_palindrome",
            Self::WordCount => "word_count",
            Self::Length => "length",
            Self::ContainsCharacter => "contains_character",
        }
    }
}

/// How the rules of a group are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMode {
    /// Stop at the first rule that fires.
    FirstMatch,
    /// Evaluate every rule; later writes overwrite earlier ones.
    Every,
}

/// Writes the captured values into the filter set. Returns `false` when the
/// captures could not be converted, in which case the rule does not count as
/// fired.
pub type Apply = fn(&Captures<'_>, &mut FilterSet) -> bool;

/// A single `(pattern, field, transform)` rule.
pub struct Rule {
    /// Stable identifier, reported back to callers when the rule fires.
    pub id: &'static str,
    pub field: FilterField,
    pattern: Regex,
    apply: Apply,
}

impl Rule {
    /// Compile a new rule.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn new(
        id: &'static str,
        field: FilterField,
        pattern: &str,
        apply: Apply,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            id,
            field,
            pattern: Regex::new(pattern)?,
            apply,
        })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Run the rule against an already normalized query.
    pub fn try_apply(&self, query: &str, filters: &mut FilterSet) -> bool {
        self.pattern
            .captures(query)
            .is_some_and(|caps| (self.apply)(&caps, filters))
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// An ordered set of rules sharing an evaluation mode.
#[derive(Debug)]
pub struct RuleGroup {
    pub name: &'static str,
    pub mode: GroupMode,
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    #[must_use]
    pub const fn new(name: &'static str, mode: GroupMode, rules: Vec<Rule>) -> Self {
        Self { name, mode, rules }
    }

    /// Evaluate the group, pushing the ids of fired rules onto `fired`.
    pub fn evaluate(
        &self,
        query: &str,
        filters: &mut FilterSet,
        fired: &mut Vec<&'static str>,
    ) {
        for rule in &self.rules {
            if rule.try_apply(query, filters) {
                debug!(group = self.name, rule = rule.id, "query rule fired");
                fired.push(rule.id);
                if self.mode == GroupMode::FirstMatch {
                    return;
                }
            }
        }
    }
}

/// Parse the first capture group as a number.
///
/// Patterns only capture ASCII digits, so the one failure mode is overflow,
/// which saturates at `i64::MAX`.
fn number(caps: &Captures<'_>) -> Option<i64> {
    let digits = caps.get(1)?.as_str();
    Some(digits.parse::<i64>().unwrap_or_else(|e| {
        debug!("clamping numeric capture {digits:?}: {e}");
        i64::MAX
    }))
}

/// Take the first capture group as a single character.
fn letter(caps: &Captures<'_>) -> Option<char> {
    let mut chars = caps.get(1)?.as_str().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Default rule groups, in evaluation order.
///
/// # Errors
/// Returns an error if any built-in pattern fails to compile.
pub fn default_rules() -> Result<Vec<RuleGroup>, regex::Error> {
    Ok(vec![
        palindrome_rules()?,
        word_count_rules()?,
        length_rules()?,
        containment_rules()?,
        ordinal_vowel_rules()?,
    ])
}

fn palindrome_rules() -> Result<RuleGroup, regex::Error> {
    Ok(RuleGroup::new(
        "palindrome",
        GroupMode::FirstMatch,
        vec![Rule::new(
            "palindrome",
            FilterField::IsPalindrome,
            r"palindrom",
            |_, f| {
                f.is_palindrome = Some(true);
                true
            },
        )?],
    ))
}

fn word_count_rules() -> Result<RuleGroup, regex::Error> {
    Ok(RuleGroup::new(
        "word_count",
        GroupMode::FirstMatch,
        vec![
            Rule::new(
                "single_word",
                FilterField::WordCount,
                r"\b(?:single|one)\s+word\b",
                |_, f| {
                    f.word_count = Some(1);
                    true
                },
            )?,
            Rule::new(
                "two_words",
                FilterField::WordCount,
                r"\btwo\s+words?\b",
                |_, f| {
                    f.word_count = Some(2);
                    true
                },
            )?,
            Rule::new(
                "three_words",
                FilterField::WordCount,
                r"\bthree\s+words?\b",
                |_, f| {
                    f.word_count = Some(3);
                    true
                },
            )?,
            Rule::new(
                "n_words",
                FilterField::WordCount,
                r"\b([0-9]+)\s+words?\b",
                |caps, f| {
                    let Some(n) = number(caps) else {
                        return false;
                    };
                    f.word_count = Some(n);
                    true
                },
            )?,
        ],
    ))
}

fn length_rules() -> Result<RuleGroup, regex::Error> {
    Ok(RuleGroup::new(
        "length",
        GroupMode::Every,
        vec![
            Rule::new(
                "longer_than",
                FilterField::Length,
                r"\b(?:longer|more)\s+than\s+([0-9]+)(?:\s+characters?)?\b",
                |caps, f| {
                    let Some(n) = number(caps) else {
                        return false;
                    };
                    f.min_length = Some(n.saturating_add(1));
                    true
                },
            )?,
            Rule::new(
                "shorter_than",
                FilterField::Length,
                r"\b(?:shorter|less)\s+than\s+([0-9]+)(?:\s+characters?)?\b",
                |caps, f| {
                    let Some(n) = number(caps) else {
                        return false;
                    };
                    f.max_length = Some(n - 1);
                    true
                },
            )?,
            Rule::new(
                "at_least",
                FilterField::Length,
                r"\bat\s+least\s+([0-9]+)(?:\s+characters?)?\b",
                |caps, f| {
                    let Some(n) = number(caps) else {
                        return false;
                    };
                    f.min_length = Some(n);
                    true
                },
            )?,
            Rule::new(
                "at_most",
                FilterField::Length,
                r"\bat\s+most\s+([0-9]+)(?:\s+characters?)?\b",
                |caps, f| {
                    let Some(n) = number(caps) else {
                        return false;
                    };
                    f.max_length = Some(n);
                    true
                },
            )?,
            // Runs last so it overrides every other length phrase.
            Rule::new(
                "exactly",
                FilterField::Length,
                r"\bexactly\s+([0-9]+)(?:\s+characters?)?\b",
                |caps, f| {
                    let Some(n) = number(caps) else {
                        return false;
                    };
                    f.min_length = Some(n);
                    f.max_length = Some(n);
                    true
                },
            )?,
        ],
    ))
}

fn containment_rules() -> Result<RuleGroup, regex::Error> {
    Ok(RuleGroup::new(
        "containment",
        GroupMode::FirstMatch,
        vec![
            Rule::new(
                "contains_letter",
                FilterField::ContainsCharacter,
                r"\b(?:containing|with|that\s+contain)\s+(?:the\s+)?(?:letter|character)\s+([a-z])\b",
                |caps, f| {
                    let Some(c) = letter(caps) else {
                        return false;
                    };
                    f.contains_character = Some(c);
                    true
                },
            )?,
            Rule::new(
                "containing",
                FilterField::ContainsCharacter,
                r"\bcontaining\s+([a-z])\b",
                |caps, f| {
                    let Some(c) = letter(caps) else {
                        return false;
                    };
                    f.contains_character = Some(c);
                    true
                },
            )?,
        ],
    ))
}

fn ordinal_vowel_rules() -> Result<RuleGroup, regex::Error> {
    Ok(RuleGroup::new(
        "ordinal_vowel",
        GroupMode::Every,
        vec![
            Rule::new(
                "first_vowel",
                FilterField::ContainsCharacter,
                r"first vowel",
                |_, f| {
                    f.contains_character = Some('a');
                    true
                },
            )?,
            Rule::new(
                "second_vowel",
                FilterField::ContainsCharacter,
                r"second vowel",
                |_, f| {
                    f.contains_character = Some('e');
                    true
                },
            )?,
            Rule::new(
                "third_vowel",
                FilterField::ContainsCharacter,
                r"third vowel",
                |_, f| {
                    f.contains_character = Some('i');
                    true
                },
            )?,
            Rule::new(
                "fourth_vowel",
                FilterField::ContainsCharacter,
                r"fourth vowel",
                |_, f| {
                    f.contains_character = Some('o');
                    true
                },
            )?,
            Rule::new(
                "fifth_vowel",
                FilterField::ContainsCharacter,
                r"fifth vowel",
                |_, f| {
                    f.contains_character = Some('u');
                    true
                },
            )?,
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn rules() -> Vec<RuleGroup> {
        default_rules().expect("built-in patterns should compile")
    }

    #[test]
    fn groups_run_in_documented_order() {
        let names: Vec<_> = rules().iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            [
                "palindrome",
                "word_count",
                "length",
                "containment",
                "ordinal_vowel"
            ]
        );
    }

    #[test]
    fn rule_order_within_groups() {
        let groups = rules();
        let length: Vec<_> = groups[2].rules.iter().map(|r| r.id).collect();
        assert_eq!(
            length,
            ["longer_than", "shorter_than", "at_least", "at_most", "exactly"]
        );
        assert_eq!(groups[1].mode, GroupMode::FirstMatch);
        assert_eq!(groups[2].mode, GroupMode::Every);
        assert_eq!(groups[4].mode, GroupMode::Every);
    }

    #[test]
    fn first_match_group_stops_after_hit() {
        let groups = rules();
        let mut filters = FilterSet::default();
        let mut fired = Vec::new();

        groups[1].evaluate("one word and 3 words", &mut filters, &mut fired);

        assert_eq!(fired, ["single_word"]);
        assert_eq!(filters.word_count, Some(1));
    }

    #[test]
    fn every_group_lets_later_rules_overwrite() {
        let groups = rules();
        let mut filters = FilterSet::default();
        let mut fired = Vec::new();

        groups[2].evaluate("less than 5 or at most 3", &mut filters, &mut fired);

        assert_eq!(fired, ["shorter_than", "at_most"]);
        assert_eq!(filters.max_length, Some(3));
    }

    #[test]
    fn numeric_overflow_saturates() {
        let groups = rules();
        let mut filters = FilterSet::default();
        let mut fired = Vec::new();

        groups[2].evaluate(
            "longer than 99999999999999999999999 characters",
            &mut filters,
            &mut fired,
        );

        assert_eq!(fired, ["longer_than"]);
        assert_eq!(filters.min_length, Some(i64::MAX));

        let mut filters = FilterSet::default();
        let mut fired = Vec::new();
        groups[1].evaluate("99999999999999999999 words", &mut filters, &mut fired);

        assert_eq!(fired, ["n_words"]);
        assert_eq!(filters.word_count, Some(i64::MAX));
    }

    #[test]
    fn field_names() {
        assert_eq!(FilterField::WordCount.as_str(), "word_count");
        assert_eq!(FilterField::ContainsCharacter.as_str(), "contains_character");
    }

    #[test]
    fn rule_exposes_pattern() {
        let groups = rules();
        assert_eq!(groups[0].rules[0].pattern(), "palindrom");
    }
}
