//! Error types for the listing query engine and its property store.

use thiserror::Error;

/// Rejected query parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Sort key outside the supported set
    #[error("unknown sort key '{0}'; expected none, price_asc, price_desc, date_desc, date_asc")]
    UnknownSortKey(String),
}

/// Property store failures. Never retried by this crate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Bad base URL or HTTP client setup
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection failed, timed out, or the body could not be read
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("{context}: store responded with status {status}")]
    Status { status: u16, context: &'static str },

    /// Single-resource lookup for an id the store does not know
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body was not the JSON we expected
    #[error("parse error: {0}")]
    Parse(String),
}

/// Rejected listing or rating payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("rating must be between 1 and 5 stars, got {0}")]
    StarsOutOfRange(u8),
}

/// Anything a catalog operation can fail with.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
