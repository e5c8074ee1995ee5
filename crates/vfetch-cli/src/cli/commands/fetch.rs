//! `vfetch fetch <source>...` – fetch one artifact.

use anyhow::{Context, Result};
use std::path::PathBuf;
use vfetch_core::config::FetchConfig;
use vfetch_core::{FetchOutcome, FetchRequest, Fetcher};

pub fn run_fetch(
    cfg: &FetchConfig,
    sources: Vec<String>,
    dest: Option<PathBuf>,
    sha256: Option<String>,
) -> Result<()> {
    let fetcher = Fetcher::from_config(cfg)?;
    let destination = match dest {
        Some(p) if p.is_relative() => Some(
            std::env::current_dir()
                .context("resolve current directory")?
                .join(p),
        ),
        other => other,
    };
    let req = FetchRequest {
        sources,
        destination,
        expected_digest: sha256,
    };

    match fetcher.fetch(&req)? {
        FetchOutcome::Fetched {
            path,
            source,
            bytes,
            elapsed,
            ..
        } => {
            tracing::info!(
                "fetched {} ({} bytes) from {} in {:.1}s",
                path.display(),
                bytes,
                source,
                elapsed.as_secs_f64()
            );
            println!("{}", path.display());
            Ok(())
        }
        FetchOutcome::Exhausted { attempted } => {
            anyhow::bail!("all {} candidate source(s) failed", attempted)
        }
    }
}
