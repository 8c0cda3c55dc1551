//! Error types for the file handle layer.

use tagbridge_marshal::MarshalError;
use tagbridge_stream::StreamError;

/// Result type for file handle operations.
pub type Result<T> = std::result::Result<T, FileRefError>;

/// Errors surfaced to the host.
#[derive(Debug, thiserror::Error)]
pub enum FileRefError {
    /// The handle was closed or never parsed.
    #[error("file handle is closed or invalid")]
    InvalidHandle,

    /// The constructor got something that is neither a path nor a stream.
    #[error("expected a path or a stream, got {found}")]
    UnsupportedInput { found: &'static str },

    /// A tag update used a key outside the fixed set.
    #[error("unknown tag property: {key}")]
    UnknownKey { key: String },

    /// The library was built without the capability.
    #[error("{feature} not available in major version {major}")]
    UnsupportedFeature { feature: &'static str, major: u32 },

    /// The wrapped resource failed.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// An update could not be converted.
    #[error(transparent)]
    Marshal(MarshalError),

    /// Compiled and runtime library disagree on the major version.
    #[error("incompatible library version: compiled with {compiled} but loaded {runtime}")]
    VersionMismatch { compiled: String, runtime: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The library reported that it could not write.
    #[error("failed to save {name}")]
    SaveFailed { name: String },
}

impl FileRefError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        FileRefError::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<MarshalError> for FileRefError {
    fn from(e: MarshalError) -> Self {
        match e {
            MarshalError::UnknownKey { key } => FileRefError::UnknownKey { key },
            other => FileRefError::Marshal(other),
        }
    }
}
