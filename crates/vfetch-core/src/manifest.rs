//! Artifact manifests: a batch of fetch requests read from TOML or JSON.
//!
//! ```toml
//! [[artifact]]
//! name = "vcredist-x64"
//! sources = [
//!     "https://mirror.internal.example/redist/vc_redist.x64.exe",
//!     "https://aka.example.com/vs/17/release/vc_redist.x64.exe",
//! ]
//! sha256 = "..."
//! destination = "redist/vc_redist.x64.exe"
//! ```
//!
//! Relative destinations are resolved against the manifest's directory.

use crate::error::FetchError;
use crate::fetcher::{FetchOutcome, Fetcher};
use crate::request::FetchRequest;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("parse JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artifact #{0} has an empty name")]
    EmptyName(usize),
}

/// One artifact entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub name: String,
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "artifact", alias = "artifacts")]
    pub artifacts: Vec<ArtifactEntry>,
    /// Directory relative destinations are joined to. Not part of the file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Per-artifact result of `fetch_all`.
#[derive(Debug)]
pub struct ArtifactResult {
    pub name: String,
    pub outcome: Result<FetchOutcome, FetchError>,
}

impl ArtifactResult {
    pub fn succeeded(&self) -> bool {
        matches!(&self.outcome, Ok(o) if o.succeeded())
    }
}

impl Manifest {
    pub fn from_toml_str(s: &str) -> Result<Self, ManifestError> {
        let m: Manifest = toml::from_str(s)?;
        m.check()
    }

    pub fn from_json_str(s: &str) -> Result<Self, ManifestError> {
        let m: Manifest = serde_json::from_str(s)?;
        m.check()
    }

    /// Reads a manifest; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let read_err = |source: std::io::Error| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        };
        let data = std::fs::read_to_string(path).map_err(read_err)?;
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let mut manifest = if is_json {
            Self::from_json_str(&data)?
        } else {
            Self::from_toml_str(&data)?
        };
        let abs = std::fs::canonicalize(path).map_err(read_err)?;
        manifest.base_dir = abs.parent().map(Path::to_path_buf);
        tracing::debug!(
            path = %path.display(),
            artifacts = manifest.artifacts.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    fn check(self) -> Result<Self, ManifestError> {
        if let Some(i) = self.artifacts.iter().position(|a| a.name.trim().is_empty()) {
            return Err(ManifestError::EmptyName(i));
        }
        Ok(self)
    }

    /// Builds one request per artifact, in file order.
    pub fn requests(&self) -> Vec<(String, FetchRequest)> {
        self.artifacts
            .iter()
            .map(|a| {
                let destination = a.destination.as_ref().map(|d| match &self.base_dir {
                    Some(base) if d.is_relative() => base.join(d),
                    _ => d.clone(),
                });
                let req = FetchRequest {
                    sources: a.sources.clone(),
                    destination,
                    expected_digest: a.sha256.clone(),
                };
                (a.name.clone(), req)
            })
            .collect()
    }
}

/// Fetches every artifact sequentially. Input errors on one artifact do not
/// stop the others.
pub fn fetch_all<T: Transport>(fetcher: &Fetcher<T>, manifest: &Manifest) -> Vec<ArtifactResult> {
    manifest
        .requests()
        .into_iter()
        .map(|(name, req)| {
            let outcome = fetcher.fetch(&req);
            if let Err(e) = &outcome {
                tracing::error!(artifact = %name, "invalid artifact entry: {}", e);
            }
            ArtifactResult { name, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferError;

    const TOML: &str = r#"
        [[artifact]]
        name = "vcredist-x64"
        sources = ["https://a.example/vc_redist.x64.exe", "https://b.example/vc_redist.x64.exe"]
        sha256 = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        destination = "redist/vc_redist.x64.exe"

        [[artifact]]
        name = "ndp48"
        sources = ["https://c.example/ndp48.exe"]
    "#;

    #[test]
    fn parses_toml_artifacts() {
        let m = Manifest::from_toml_str(TOML).unwrap();
        assert_eq!(m.artifacts.len(), 2);
        assert_eq!(m.artifacts[0].name, "vcredist-x64");
        assert_eq!(m.artifacts[0].sources.len(), 2);
        assert!(m.artifacts[1].sha256.is_none());
        assert!(m.artifacts[1].destination.is_none());
    }

    #[test]
    fn parses_json_artifacts() {
        let json = r#"{
            "artifacts": [
                { "name": "vcredist-x86", "sources": ["https://a.example/vc_redist.x86.exe"] }
            ]
        }"#;
        let m = Manifest::from_json_str(json).unwrap();
        assert_eq!(m.artifacts.len(), 1);
        assert_eq!(m.artifacts[0].name, "vcredist-x86");
    }

    #[test]
    fn empty_name_rejected() {
        let toml = r#"
            [[artifact]]
            name = " "
            sources = ["https://a.example/x.exe"]
        "#;
        assert!(matches!(
            Manifest::from_toml_str(toml),
            Err(ManifestError::EmptyName(0))
        ));
    }

    #[test]
    fn load_resolves_relative_destination_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtimes.toml");
        std::fs::write(&path, TOML).unwrap();

        let m = Manifest::load(&path).unwrap();
        let reqs = m.requests();

        let base = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(
            reqs[0].1.destination.as_deref(),
            Some(base.join("redist/vc_redist.x64.exe").as_path())
        );
        assert!(reqs[1].1.destination.is_none());
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Manifest::load(&dir.path().join("missing.toml")),
            Err(ManifestError::Read { .. })
        ));
    }

    struct EmptyBodies;

    impl Transport for EmptyBodies {
        fn transfer(&self, source: &str, dest: &Path) -> Result<u64, TransferError> {
            if source.contains("a.example") {
                return Err(TransferError::Http(500));
            }
            std::fs::write(dest, b"").map_err(TransferError::Storage)?;
            Ok(0)
        }
    }

    #[test]
    fn fetch_all_reports_each_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtimes.toml");
        std::fs::write(&path, TOML).unwrap();
        let m = Manifest::load(&path).unwrap();
        let fetcher = Fetcher::new(EmptyBodies, dir.path().join("default"));

        let results = fetch_all(&fetcher, &m);

        assert_eq!(results.len(), 2);
        // a.example fails, b.example serves the empty file the digest expects.
        assert!(results[0].succeeded());
        assert!(results[1].succeeded());
        assert!(dir.path().join("default").join("ndp48.exe").exists());
    }
}
