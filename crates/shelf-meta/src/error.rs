use crate::extract::Format;

/// Errors from metadata extraction.
///
/// Neither variant fails an upload; [`crate::extract`] maps both to an
/// empty attribute mapping.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MetaError {
    /// No parser is registered for the name's suffix.
    #[error("unrecognized format: {0:?}")]
    UnrecognizedFormat(Option<String>),

    /// The suffix matched a parser but the payload is structurally invalid.
    #[error("malformed {format} container: {reason}")]
    MalformedContainer { format: Format, reason: String },
}

impl MetaError {
    pub(crate) fn malformed(format: Format, reason: impl Into<String>) -> Self {
        Self::MalformedContainer {
            format,
            reason: reason.into(),
        }
    }
}

/// Result alias for extraction operations.
pub type MetaResult<T> = Result<T, MetaError>;
