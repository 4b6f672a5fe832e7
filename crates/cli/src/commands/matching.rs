use std::path::Path;

use anyhow::Result;
use classmatch_core::diff::match_versions;
use classmatch_core::obfuscation::ClassifierKind;
use tracing::info;

use crate::{load_config, load_dump, write_output};

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct MatchOverrides {
    pub classifier: Option<ClassifierKind>,
    pub max_candidates: Option<usize>,
    pub no_package_matching: bool,
    pub no_name_matching: bool,
}

/// Match every class of `old` against `new` and emit the ranked candidates as JSON.
pub fn match_command(
    old: &Path,
    new: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
    overrides: &MatchOverrides,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(classifier) = overrides.classifier {
        config.classifier = classifier;
    }
    if let Some(max_candidates) = overrides.max_candidates {
        config.max_candidates = max_candidates;
    }
    if overrides.no_package_matching {
        config.match_packages = false;
    }
    if overrides.no_name_matching {
        config.match_by_name = false;
    }

    let old_dump = load_dump(old)?;
    let new_dump = load_dump(new)?;
    info!(old = %old.display(), new = %new.display(), classifier = %config.classifier, "matching versions");

    let matches = match_versions(&config, old_dump, new_dump)?;
    write_output(output, &matches.to_json_pretty()?)?;

    if let Some(path) = output {
        let without = matches.without_candidates().count();
        println!("Matched {} classes ({} without candidates)", matches.len(), without);
        println!("  Output: {}", path.display());
    }
    Ok(())
}
