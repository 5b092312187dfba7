use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("String already exists in the system: {0}")]
    Duplicate(String),

    #[error("Invalid value for \"{field}\" parameter. {reason}")]
    InvalidFilter { field: &'static str, reason: String },
}

impl Error {
    #[must_use]
    pub fn invalid_filter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            field,
            reason: reason.into(),
        }
    }
}
