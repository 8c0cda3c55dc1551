//! Error types for the stream layer.
//!
//! Errors at this level are transport-focused. Failures raised by the host
//! resource are carried through unchanged in [`StreamError::Transport`].

use crate::SeekOrigin;

/// Result alias for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Errors at the stream layer.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Failure reported by the wrapped resource.
    ///
    /// The underlying error is kept as the source. Nothing is retried.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The resource has been closed.
    #[error("resource is closed")]
    Closed,

    /// The resource does not accept writes.
    #[error("resource is read-only")]
    ReadOnly,

    /// A seek would land before the start of the resource.
    #[error("invalid seek to offset {offset} from {origin:?}")]
    InvalidSeek { offset: i64, origin: SeekOrigin },
}

impl StreamError {
    /// Wrap any error raised by a host resource.
    pub fn transport<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        StreamError::Transport(error.into())
    }
}

impl From<std::io::Error> for StreamError {
    fn from(e: std::io::Error) -> Self {
        StreamError::Transport(Box::new(e))
    }
}
