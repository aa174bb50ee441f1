//! Subcommand implementations.

pub mod query;
pub mod serve;

use std::path::Path;

use anyhow::{Result, bail};

/// Fail early when a repository directory is missing.
fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("Repository directory not found: {}", path.display());
    }
    Ok(())
}
