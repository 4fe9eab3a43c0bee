use thiserror::Error;

/// Errors from parsing order query parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
    #[error("Unknown order tab: {0}")]
    UnknownTab(String),
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}
