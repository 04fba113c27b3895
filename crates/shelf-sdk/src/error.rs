use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("name already in use: {0}")]
    NameConflict(String),

    #[error("{0} files found")]
    AmbiguousSelection(usize),

    #[error("no files found")]
    EmptySelection,

    #[error(transparent)]
    InvalidName(#[from] shelf_types::TypeError),

    #[error(transparent)]
    Query(#[from] shelf_query::QueryError),

    #[error("store error: {0}")]
    Store(#[from] shelf_store::StoreError),
}

pub type SdkResult<T> = Result<T, SdkError>;
