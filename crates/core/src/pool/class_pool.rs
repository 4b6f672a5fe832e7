//! Per-version class pool and its split into packages.

use std::sync::Arc;

use tracing::debug;

use crate::model::descriptor::parent_package_prefix;
use crate::model::{ClassDefinition, ClassDump};
use crate::obfuscation::ObfuscationDetector;
use crate::pool::{ClassLookup, ClassMap, ClassRecord, PackagePool, PackageRecord};

/// Every application-defined class of one version, keyed by fully-qualified name.
///
/// Externally defined classes never enter the pool.
#[derive(Debug, Default)]
pub struct ClassPool {
    classes: ClassMap,
}

impl ClassPool {
    pub fn from_dump(dump: ClassDump, detector: &dyn ObfuscationDetector) -> Self {
        Self::from_definitions(dump.classes, detector)
    }

    pub fn from_definitions<I>(definitions: I, detector: &dyn ObfuscationDetector) -> Self
    where
        I: IntoIterator<Item = ClassDefinition>,
    {
        let mut external = 0usize;
        let classes: ClassMap = definitions
            .into_iter()
            .filter(|definition| {
                if definition.external {
                    external += 1;
                }
                !definition.external
            })
            .map(|definition| {
                let is_obfuscated = detector.is_class_name_obfuscated(&definition.name);
                (definition.name.clone(), Arc::new(ClassRecord::new(definition, is_obfuscated)))
            })
            .collect();
        debug!(classes = classes.len(), external, classifier = detector.name(), "built class pool");
        Self { classes }
    }

    /// Keep only the classes for which `keep` returns true.
    pub fn filter<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &ClassRecord) -> bool,
    {
        let before = self.classes.len();
        self.classes.retain(|name, record| keep(name.as_str(), &**record));
        debug!(removed = before - self.classes.len(), kept = self.classes.len(), "filtered class pool");
    }

    /// Group the classes by parent package prefix.
    ///
    /// Records are shared with this pool; each package is classified once by its prefix.
    pub fn split_by_package(&self, detector: &dyn ObfuscationDetector) -> PackagePool {
        let mut packages = PackagePool::default();
        for (name, record) in &self.classes {
            let prefix = parent_package_prefix(name);
            packages
                .entry(prefix)
                .or_insert_with(|| {
                    PackageRecord::new(prefix, detector.is_package_name_obfuscated(prefix))
                })
                .add_class(Arc::clone(record));
        }
        packages
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ClassRecord>> {
        self.classes.get(name)
    }

    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassLookup for ClassPool {
    fn get_class(&self, name: &str) -> Option<&Arc<ClassRecord>> {
        self.classes.get(name)
    }

    fn iter_classes(&self) -> Box<dyn Iterator<Item = (&String, &Arc<ClassRecord>)> + Send + '_> {
        Box::new(self.classes.iter())
    }

    fn class_count(&self) -> usize {
        self.classes.len()
    }
}
