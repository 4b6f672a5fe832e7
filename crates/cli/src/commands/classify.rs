use std::path::Path;

use anyhow::Result;
use classmatch_core::model::descriptor::java_to_descriptor;
use classmatch_core::model::ClassDump;
use classmatch_core::obfuscation::{build_detector, ClassifierKind, ObfuscationDetector};
use serde::Serialize;

use crate::{load_config, load_dump};

#[derive(Debug, Serialize)]
pub struct Classification {
    pub name: String,
    pub kind: &'static str,
    pub obfuscated: bool,
}

/// Classify identifiers as obfuscated or human authored.
///
/// Class names may be given in Java or descriptor form. Package names are prefixes such as
/// `Lcom/app`. The set-membership classifier needs both `--old` and `--new` dumps.
pub fn classify_command(
    names: &[String],
    packages: bool,
    config_path: Option<&Path>,
    classifier: Option<ClassifierKind>,
    versions: Option<(&Path, &Path)>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let kind = classifier.unwrap_or(config.classifier);
    let dumps: Option<(ClassDump, ClassDump)> = match versions {
        Some((old, new)) => Some((load_dump(old)?, load_dump(new)?)),
        None => None,
    };
    let detector = build_detector(
        kind,
        false,
        config.dictionary()?,
        dumps.as_ref().map(|(old, new)| (old, new)),
        &config.external_prefixes,
    )?;

    let results: Vec<Classification> = names
        .iter()
        .map(|name| {
            if packages {
                Classification {
                    name: name.clone(),
                    kind: "package",
                    obfuscated: detector.is_package_name_obfuscated(name),
                }
            } else {
                let descriptor = java_to_descriptor(name);
                Classification {
                    obfuscated: detector.is_class_name_obfuscated(&descriptor),
                    name: descriptor,
                    kind: "class",
                }
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            let verdict = if result.obfuscated { "obfuscated" } else { "clear" };
            println!("{}\t{}\t{}", result.kind, result.name, verdict);
        }
    }
    Ok(())
}
