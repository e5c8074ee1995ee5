//! `vfetch manifest <file>` – fetch every artifact in a manifest.

use anyhow::Result;
use std::path::Path;
use vfetch_core::config::FetchConfig;
use vfetch_core::manifest::{self, Manifest};
use vfetch_core::Fetcher;

pub fn run_manifest(cfg: &FetchConfig, path: &Path) -> Result<()> {
    let manifest = Manifest::load(path)?;
    if manifest.artifacts.is_empty() {
        println!("No artifacts in manifest.");
        return Ok(());
    }
    let fetcher = Fetcher::from_config(cfg)?;
    let results = manifest::fetch_all(&fetcher, &manifest);

    println!("{:<24} {:<8} {}", "ARTIFACT", "STATUS", "DETAIL");
    for r in &results {
        let (status, detail) = match &r.outcome {
            Ok(o) => match o.path() {
                Some(p) => ("ok", p.display().to_string()),
                None => ("failed", "all candidate sources failed".to_string()),
            },
            Err(e) => ("invalid", e.to_string()),
        };
        println!("{:<24} {:<8} {}", r.name, status, detail);
    }

    let failed = results.iter().filter(|r| !r.succeeded()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} artifact(s) failed", failed, results.len());
    }
    tracing::info!("manifest completed {} artifact(s)", results.len());
    Ok(())
}
