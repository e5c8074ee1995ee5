//! CLI for the vfetch verified downloader.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use vfetch_core::config;

use commands::{run_checksum, run_completions, run_fetch, run_man, run_manifest};

/// Top-level CLI for vfetch.
#[derive(Debug, Parser)]
#[command(name = "vfetch")]
#[command(
    about = "vfetch: fetch an artifact from ordered candidate sources with SHA-256 verification",
    long_about = None
)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/vfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download one artifact, trying each source in order until one succeeds.
    Fetch {
        /// Candidate locators (http, https, ftp, file), most preferred first.
        #[arg(required = true, value_name = "SOURCE")]
        sources: Vec<String>,

        /// Target file. Relative paths are resolved against the current directory.
        /// Defaults to the first source's file name inside the configured download_dir.
        #[arg(long, short = 'o', value_name = "PATH")]
        dest: Option<PathBuf>,

        /// Expected SHA-256 of the file (hex, any case). Mismatching downloads are deleted.
        #[arg(long, value_name = "HEX")]
        sha256: Option<String>,
    },

    /// Fetch every artifact listed in a TOML or JSON manifest.
    Manifest {
        /// Path to the manifest file.
        path: PathBuf,
    },

    /// Compute SHA-256 of a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These do not need a config file.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell, &mut Cli::command()),
            CliCommand::Man => return run_man(Cli::command()),
            CliCommand::Checksum { path } => return run_checksum(path),
            _ => {}
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                sources,
                dest,
                sha256,
            } => run_fetch(&cfg, sources, dest, sha256)?,
            CliCommand::Manifest { path } => run_manifest(&cfg, &path)?,
            CliCommand::Checksum { .. } | CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
