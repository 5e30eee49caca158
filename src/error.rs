//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. Every
//! failure a caller may want to branch on has its own variant.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid descriptor '{descriptor}': {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },

    #[error("Unsupported scheme '{found}', expected '{expected}://'")]
    UnsupportedScheme {
        expected: &'static str,
        found: String,
    },

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid retention pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Tracking store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected URL path format: {0}")]
    UnexpectedUrlPathFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
