use std::path::Path;

use anyhow::{anyhow, Result};
use classmatch_core::config::MatchConfig;

/// Write the default match configuration to `path` (JSON or YAML by extension).
pub fn init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }
    MatchConfig::default().save(path)?;
    println!("Wrote default match config:");
    println!("  Path: {}", path.display());
    Ok(())
}
