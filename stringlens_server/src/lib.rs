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

//! HTTP surface for the string analysis service.

mod error;
mod params;
mod routes;
mod server;
mod state;

pub use error::{ApiError, ApiErrorBody};
pub use params::FilterParams;
pub use routes::router;
pub use server::Server;
pub use state::AppState;
