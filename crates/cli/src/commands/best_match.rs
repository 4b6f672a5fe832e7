use std::path::Path;

use anyhow::{anyhow, Result};
use classmatch_core::matching::ClassesMatches;
use classmatch_core::model::descriptor::java_to_descriptor;

/// Look up the lowest-rank candidate of one class in a saved match result.
pub fn best_match_command(matches_path: &Path, class: &str, json: bool) -> Result<()> {
    let matches = ClassesMatches::load(matches_path)?;
    let descriptor = java_to_descriptor(class);
    if matches.get(class).is_none() && matches.get(&descriptor).is_none() {
        return Err(anyhow!("Class {class} is not part of {}", matches_path.display()));
    }

    match matches.best_match(class) {
        Some(candidate) if json => {
            let body = serde_json::json!({ "class": descriptor, "match": candidate.name, "rank": candidate.rank });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Some(candidate) => println!("{}\t{}", candidate.name, candidate.rank),
        None if json => {
            let body = serde_json::json!({ "class": descriptor, "match": null, "rank": null });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        None => println!("{descriptor} has no candidates"),
    }
    Ok(())
}
