#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors surfaced to the host. None of them are fatal to the page: the host
/// logs the rejection and keeps running.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("config json: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("nav link index {index} out of range (have {len})")]
    UnknownNavLink { index: usize, len: usize },

    #[error("filter button index {index} out of range (have {len})")]
    UnknownFilter { index: usize, len: usize },

    #[error("project card index {index} out of range (have {len})")]
    UnknownCard { index: usize, len: usize },

    #[error("portfolio not initialized")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, FolioError>;
