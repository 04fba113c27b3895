use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shelf_sdk::{QueryError, SdkError};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Missing argument name")]
    MissingName,

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingName => StatusCode::BAD_REQUEST,
            Self::Sdk(err) => match err {
                SdkError::NameConflict(_)
                | SdkError::AmbiguousSelection(_)
                | SdkError::InvalidName(_) => StatusCode::BAD_REQUEST,
                SdkError::EmptySelection => StatusCode::NOT_FOUND,
                SdkError::Query(err) => query_status(err),
                SdkError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Query(err) => query_status(err),
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body sent to the client.
    pub fn body(&self) -> String {
        match self {
            Self::Sdk(SdkError::NameConflict(_)) => "File name already in use\n".into(),
            Self::Sdk(SdkError::AmbiguousSelection(n)) => format!("{n} files found.\n"),
            Self::Sdk(SdkError::EmptySelection) => "No files found\n".into(),
            other => format!("{other}\n"),
        }
    }
}

fn query_status(err: &QueryError) -> StatusCode {
    match err {
        QueryError::InvalidNumericLiteral { .. } => StatusCode::BAD_REQUEST,
        QueryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        } else {
            warn!(status = %status, error = %self, "request rejected");
        }
        (status, self.body()).into_response()
    }
}
