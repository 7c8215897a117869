use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or rejected the operation.
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A stored document does not have the shape the operation expects.
    #[error("malformed document `{id}`: {message}")]
    MalformedDocument { id: String, message: String },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct an error for a document whose fields cannot be interpreted.
    pub fn malformed(id: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::MalformedDocument {
            id: id.into(),
            message: message.into(),
        }
    }
}
