use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use classmatch_core::config::MatchConfig;
use classmatch_core::model::ClassDump;

pub mod commands;
pub mod logging;

/// Load the match configuration from `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::load(path),
        None => Ok(MatchConfig::default()),
    }
}

/// Read one version's class dump.
pub fn load_dump(path: &Path) -> Result<ClassDump> {
    ClassDump::load(path).with_context(|| format!("Failed to load class dump {}", path.display()))
}

/// Write `body` to `output`, or to stdout when no output path is given.
pub fn write_output(output: Option<&Path>, body: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create output dir: {}", parent.display()))?;
            }
            fs::write(path, body)
                .with_context(|| format!("Failed to write output: {}", path.display()))
        }
        None => {
            println!("{body}");
            Ok(())
        }
    }
}
