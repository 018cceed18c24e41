//! Error types returned by the observable containers.

use thiserror::Error;

/// Failures reported by fallible container operations.
///
/// Every operation that returns one of these has left the container untouched
/// and emitted no notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("item not found in collection")]
    ItemNotFound,

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

pub type Result<T> = std::result::Result<T, CollectionError>;
