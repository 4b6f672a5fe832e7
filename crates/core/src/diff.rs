//! End-to-end comparison of two application versions.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::MatchConfig;
use crate::filters::keep_all;
use crate::matching::ClassesMatches;
use crate::model::ClassDump;
use crate::obfuscation::ObfuscationDetector;
use crate::pool::ClassPool;

/// Both versions pooled and filtered, with the classifier they were classified by.
pub struct PreparedVersions {
    pub detector: Arc<dyn ObfuscationDetector>,
    pub old: ClassPool,
    pub new: ClassPool,
}

/// Build the classifier and both filtered class pools.
pub fn prepare(config: &MatchConfig, old: ClassDump, new: ClassDump) -> Result<PreparedVersions> {
    config.validate()?;
    let detector = config.detector(&old, &new)?;
    let filters = config.filters.build();

    let mut old = ClassPool::from_dump(old, detector.as_ref());
    let mut new = ClassPool::from_dump(new, detector.as_ref());
    old.filter(|name, record| keep_all(&filters, name, record));
    new.filter(|name, record| keep_all(&filters, name, record));

    info!(
        classifier = detector.name(),
        old_classes = old.len(),
        new_classes = new.len(),
        "prepared class pools"
    );
    Ok(PreparedVersions { detector, old, new })
}

/// Match every class of `old` against `new` under `config`.
pub fn match_versions(config: &MatchConfig, old: ClassDump, new: ClassDump) -> Result<ClassesMatches> {
    let prepared = prepare(config, old, new)?;
    let matcher = config.matcher(Arc::clone(&prepared.detector))?;
    Ok(matcher.find_classes_matches(&prepared.old, &prepared.new))
}
