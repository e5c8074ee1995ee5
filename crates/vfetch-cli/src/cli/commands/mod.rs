//! CLI command handlers, one per file.

mod checksum;
mod completions;
mod fetch;
mod manifest;

pub use checksum::run_checksum;
pub use completions::{run_completions, run_man};
pub use fetch::run_fetch;
pub use manifest::run_manifest;
