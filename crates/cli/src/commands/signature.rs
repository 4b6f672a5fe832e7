use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use classmatch_core::model::descriptor::java_to_descriptor;
use classmatch_core::pool::ClassPool;
use classmatch_core::signature::{Signature, SignatureCalculator};

use crate::{load_config, load_dump, write_output};

/// Print the signatures of the classes in one dump as JSON.
///
/// The dump is compared against itself for classifiers that need two versions.
pub fn signature_command(
    dump_path: &Path,
    class: Option<&str>,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let dump = load_dump(dump_path)?;
    let detector = config.detector(&dump, &dump)?;
    let calculator =
        SignatureCalculator::new(Arc::clone(&detector)).with_shingle_size(config.shingle_size)?;
    let pool = ClassPool::from_dump(dump, detector.as_ref());

    let signatures: BTreeMap<&str, &Signature> = match class {
        Some(name) => {
            let descriptor = java_to_descriptor(name);
            let record = pool
                .get(&descriptor)
                .ok_or_else(|| anyhow!("Class {descriptor} not found in {}", dump_path.display()))?;
            BTreeMap::from([(record.name(), record.signature(&calculator))])
        }
        None => pool
            .classes()
            .values()
            .map(|record| (record.name(), record.signature(&calculator)))
            .collect(),
    };

    write_output(output, &serde_json::to_string_pretty(&signatures)?)
}
