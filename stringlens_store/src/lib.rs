#![warn(
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

//! In-memory storage for analyzed strings.
//!
//! State lives for the lifetime of the process. The store is constructed by
//! the composition root and shared by reference; there is no global instance.

mod memory;

pub use memory::MemoryStore;
pub use stringlens_core::StringRepo;
