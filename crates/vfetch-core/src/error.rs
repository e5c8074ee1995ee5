//! Error types for the fetcher and its transport.
//!
//! Only input-validation problems surface as `FetchError`. Transfer and
//! integrity failures are recovered inside the candidate loop and end up
//! as an unsuccessful `FetchOutcome`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal input-validation errors, reported before any transfer is attempted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("destination must be an absolute path: {}", .0.display())]
    RelativeDestination(PathBuf),

    #[error("invalid SHA-256 digest {0:?}: expected 64 hex characters")]
    InvalidDigest(String),

    #[error("no default download directory available: {0}")]
    DefaultDir(String),
}

/// Error from a single transfer attempt against one candidate source.
#[derive(Debug, Error)]
pub enum TransferError {
    /// libcurl reported an error (DNS, connect, timeout, unsupported protocol, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),

    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),

    /// Local file could not be created or written.
    #[error("storage: {0}")]
    Storage(#[source] io::Error),

    #[error("unsupported source scheme: {0}")]
    UnsupportedScheme(String),
}

/// Why a single candidate was abandoned. Logged, never returned to callers.
#[derive(Debug, Error)]
pub enum AttemptFailure {
    #[error("transfer failed: {0}")]
    Transport(#[from] TransferError),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error("could not hash downloaded file: {0}")]
    Verify(String),
}
