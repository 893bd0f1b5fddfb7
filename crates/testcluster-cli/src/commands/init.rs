//! Init command.

use anyhow::{Context, Result, bail};
use std::path::Path;
use testcluster::ClusterConfig;
use testcluster::config::CONFIG_FILE;

/// Writes the default configuration into `dir`.
pub fn run(dir: &str, force: bool) -> Result<()> {
    let dir = Path::new(dir);
    let target = dir.join(CONFIG_FILE);

    if target.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            target.display()
        );
    }

    let written = ClusterConfig::default()
        .save(dir)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!("Wrote {}", written.display());
    println!();
    println!("Edit it to match your control program, then run:");
    println!("  testcluster up --dir {}", dir.display());

    Ok(())
}
