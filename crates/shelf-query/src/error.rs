//! Error types for the query crate.

use shelf_store::StoreError;

/// Errors that can occur while building or running a query.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    /// A range clause value is not a number.
    #[error("invalid numeric literal for {clause}: {value:?}")]
    InvalidNumericLiteral { clause: String, value: String },

    /// The store could not be read.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience alias for query results.
pub type QueryResult<T> = Result<T, QueryError>;
