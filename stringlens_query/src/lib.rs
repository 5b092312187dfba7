#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Natural-language filter parsing.
//!
//! Translates free-text queries such as "single word palindromes longer than
//! 3 characters" into a [`FilterSet`](stringlens_core::FilterSet) by running
//! a fixed, ordered list of regular-expression rules.

pub mod parser;
pub mod rules;

pub use parser::{Conflict, ParseError, ParsedQuery, QueryParser, parse};
pub use rules::{FilterField, GroupMode, Rule, RuleGroup, default_rules};
