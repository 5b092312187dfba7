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

pub mod analyzer;
pub mod error;
pub mod filter;
pub mod repository;
pub mod types;

pub use analyzer::{analyze, content_hash};
pub use error::{Error, Result};
pub use filter::FilterSet;
pub use repository::StringRepo;
pub use types::{StoredString, StringProperties};
