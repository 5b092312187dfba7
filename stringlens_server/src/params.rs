//! Validation of explicit filter query parameters.

use serde::Deserialize;
use stringlens_core::{Error, FilterSet};

/// Raw `GET /strings` query parameters, validated into a [`FilterSet`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl TryFrom<FilterParams> for FilterSet {
    type Error = Error;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        Ok(Self {
            is_palindrome: params.is_palindrome.as_deref().map(boolean).transpose()?,
            min_length: params
                .min_length
                .as_deref()
                .map(|raw| non_negative("min_length", raw))
                .transpose()?,
            max_length: params
                .max_length
                .as_deref()
                .map(|raw| non_negative("max_length", raw))
                .transpose()?,
            word_count: params
                .word_count
                .as_deref()
                .map(|raw| non_negative("word_count", raw))
                .transpose()?,
            contains_character: params
                .contains_character
                .as_deref()
                .map(single_character)
                .transpose()?,
        })
    }
}

fn boolean(raw: &str) -> Result<bool, Error> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::invalid_filter(
            "is_palindrome",
            "Must be \"true\" or \"false\"",
        )),
    }
}

fn non_negative(field: &'static str, raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| Error::invalid_filter(field, "Must be a non-negative integer"))
}

fn single_character(raw: &str) -> Result<char, Error> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::invalid_filter(
            "contains_character",
            "Must be a single character",
        )),
    }
}
