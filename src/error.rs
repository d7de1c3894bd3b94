use crate::codec::CodingPath;

/// Errors raised while encoding a value.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("key '{key}' written twice at {path}")]
    DuplicateKey { key: String, path: CodingPath },

    #[error("value {value} at {path} does not fit in {target}")]
    OutOfRange {
        path: CodingPath,
        value: String,
        target: &'static str,
    },

    #[error("{message} at {path}")]
    Custom { path: CodingPath, message: String },
}

/// Errors raised while decoding a value.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("missing key '{key}' at {path}")]
    KeyNotFound { key: String, path: CodingPath },

    #[error("expected {expected} at {path}, found null")]
    ValueNotFound {
        path: CodingPath,
        expected: &'static str,
    },

    #[error("type mismatch at {path}: expected {expected}, got {actual}")]
    TypeMismatch {
        path: CodingPath,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("value {value} at {path} does not fit in {target}")]
    OutOfRange {
        path: CodingPath,
        value: String,
        target: &'static str,
    },

    #[error("{message} at {path}")]
    Custom { path: CodingPath, message: String },
}

/// Top-level error type that wraps both directions.
#[derive(Debug, thiserror::Error)]
pub enum CodableError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type alias for codable operations.
pub type Result<T> = std::result::Result<T, CodableError>;
