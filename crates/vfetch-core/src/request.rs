//! Per-invocation fetch request and destination resolution.

use crate::checksum::ExpectedDigest;
use crate::error::FetchError;
use crate::url_model::derive_filename;
use std::path::{Path, PathBuf};

/// One logical artifact: where it may come from, where it goes, what it must hash to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    /// Candidate locators, tried in order. Empty entries are skipped.
    pub sources: Vec<String>,
    /// Absolute target path. When `None` it is derived from the first source.
    pub destination: Option<PathBuf>,
    /// Hex SHA-256 the downloaded bytes must match (any case).
    pub expected_digest: Option<String>,
}

/// A request whose inputs passed validation.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedRequest<'a> {
    pub sources: Vec<(usize, &'a str)>,
    pub destination: PathBuf,
    pub digest: Option<ExpectedDigest>,
}

impl FetchRequest {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            destination: None,
            expected_digest: None,
        }
    }

    pub fn destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    pub fn sha256(mut self, digest: impl Into<String>) -> Self {
        self.expected_digest = Some(digest.into());
        self
    }

    /// Non-empty sources with their original index.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, &str)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.trim()))
            .filter(|(_, s)| !s.is_empty())
    }

    /// Resolves the destination path without touching the file system.
    ///
    /// An explicit destination must be absolute. A derived destination uses
    /// the first non-empty source and `default_dir`. Returns `Ok(None)` when
    /// there is no explicit destination and no source to derive one from.
    pub fn resolve_destination(&self, default_dir: &Path) -> Result<Option<PathBuf>, FetchError> {
        if let Some(dest) = &self.destination {
            if !dest.is_absolute() {
                return Err(FetchError::RelativeDestination(dest.clone()));
            }
            return Ok(Some(dest.clone()));
        }
        Ok(self
            .candidates()
            .next()
            .map(|(_, first)| default_dir.join(derive_filename(first))))
    }

    /// Checks destination and digest; `Ok(None)` means there is nothing to try.
    pub(crate) fn validate(&self, default_dir: &Path) -> Result<Option<ValidatedRequest<'_>>, FetchError> {
        let destination = self.resolve_destination(default_dir)?;
        let digest = self
            .expected_digest
            .as_deref()
            .map(ExpectedDigest::parse)
            .transpose()?;
        let sources: Vec<(usize, &str)> = self.candidates().collect();
        match destination {
            Some(destination) if !sources.is_empty() => Ok(Some(ValidatedRequest {
                sources,
                destination,
                digest,
            })),
            _ => Ok(None),
        }
    }
}
