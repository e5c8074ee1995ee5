//! Verified fetcher: ordered candidate sources, optional SHA-256 check.
//!
//! Sources are tried strictly in order with no delay between them. A source
//! is abandoned when its transfer fails or when the downloaded bytes do not
//! hash to the expected digest; in the latter case the file is deleted before
//! moving on. The first source that transfers (and verifies) wins. Running
//! out of sources is an ordinary unsuccessful outcome, not an error.

use crate::checksum::{self, ExpectedDigest};
use crate::config::FetchConfig;
use crate::error::{AttemptFailure, FetchError, TransferError};
use crate::request::FetchRequest;
use crate::storage;
use crate::transport::{CurlTransport, Transport};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of a fetch that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The artifact is at `path` (and verified, if a digest was given).
    Fetched {
        path: PathBuf,
        source: String,
        /// Position of the winning source in the request's list.
        index: usize,
        bytes: u64,
        elapsed: Duration,
    },
    /// Every candidate was tried (or none existed) without success.
    Exhausted { attempted: usize },
}

impl FetchOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, FetchOutcome::Fetched { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FetchOutcome::Fetched { path, .. } => Some(path),
            FetchOutcome::Exhausted { .. } => None,
        }
    }
}

/// Runs fetch requests against a transport, deriving missing destinations
/// under `default_dir`.
#[derive(Debug, Clone)]
pub struct Fetcher<T: Transport> {
    transport: T,
    default_dir: PathBuf,
}

impl Fetcher<CurlTransport> {
    /// Fetcher using libcurl and the configured download directory.
    pub fn from_config(cfg: &FetchConfig) -> Result<Self, FetchError> {
        let default_dir = cfg
            .default_download_dir()
            .map_err(|e| FetchError::DefaultDir(format!("{:#}", e)))?;
        Ok(Self::new(CurlTransport::new(cfg.transfer.clone()), default_dir))
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            default_dir: default_dir.into(),
        }
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Fetches `req`, returning whether any candidate succeeded.
    ///
    /// Only invalid input (relative destination, malformed digest) is an `Err`;
    /// in that case no transfer is attempted.
    pub fn fetch(&self, req: &FetchRequest) -> Result<FetchOutcome, FetchError> {
        let valid = match req.validate(&self.default_dir)? {
            Some(v) => v,
            None => {
                tracing::warn!("no candidate sources given; nothing to fetch");
                return Ok(FetchOutcome::Exhausted { attempted: 0 });
            }
        };

        let span = tracing::info_span!("fetch", dest = %valid.destination.display());
        let _guard = span.enter();

        let mut attempted = 0usize;
        for &(index, source) in &valid.sources {
            attempted += 1;
            let started = Instant::now();
            let result = self.attempt(source, &valid.destination, valid.digest.as_ref());
            let elapsed = started.elapsed();
            match result {
                Ok(bytes) => {
                    tracing::info!(
                        index,
                        source,
                        bytes,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "fetched"
                    );
                    return Ok(FetchOutcome::Fetched {
                        path: valid.destination.clone(),
                        source: source.to_string(),
                        index,
                        bytes,
                        elapsed,
                    });
                }
                Err(failure) => {
                    tracing::warn!(
                        index,
                        source,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "candidate abandoned: {}",
                        failure
                    );
                }
            }
        }

        tracing::warn!(attempted, "all candidate sources failed");
        Ok(FetchOutcome::Exhausted { attempted })
    }

    /// Like `fetch`, reduced to the success flag.
    pub fn fetch_ok(&self, req: &FetchRequest) -> Result<bool, FetchError> {
        Ok(self.fetch(req)?.succeeded())
    }

    /// One candidate: stage, promote, verify. Leaves nothing behind on failure.
    fn attempt(
        &self,
        source: &str,
        dest: &Path,
        digest: Option<&ExpectedDigest>,
    ) -> Result<u64, AttemptFailure> {
        storage::ensure_parent(dest).map_err(TransferError::Storage)?;

        let staged = storage::temp_path(dest);
        let bytes = match self.transport.transfer(source, &staged) {
            Ok(n) => n,
            Err(e) => {
                storage::discard(&staged);
                return Err(e.into());
            }
        };
        if let Err(e) = storage::promote(&staged, dest) {
            storage::discard(&staged);
            return Err(TransferError::Storage(e).into());
        }

        let Some(expected) = digest else {
            return Ok(bytes);
        };
        let actual = match checksum::sha256_path(dest) {
            Ok(d) => d,
            Err(e) => {
                storage::discard(dest);
                return Err(AttemptFailure::Verify(format!("{:#}", e)));
            }
        };
        if !expected.matches(&actual) {
            storage::discard(dest);
            return Err(AttemptFailure::DigestMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        tracing::debug!(source, digest = %actual, "digest verified");
        Ok(bytes)
    }
}
