//! Class and package pools for one application version.
//!
//! Pools scope the nearest-neighbour search: classes are partitioned by package so that
//! only classes of paired packages are compared first.

pub mod chain;
pub mod class_pool;
pub mod package_pool;

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::model::ClassDefinition;
use crate::signature::{Signature, SignatureCalculator};

pub use chain::ChainedClasses;
pub use class_pool::ClassPool;
pub use package_pool::{PackagePool, PackageRecord};

/// Class name to record, ordered by name.
pub type ClassMap = BTreeMap<String, Arc<ClassRecord>>;

/// One class of a pool, classified once and fingerprinted on first use.
#[derive(Debug)]
pub struct ClassRecord {
    definition: ClassDefinition,
    is_obfuscated_name: bool,
    signature: OnceLock<Signature>,
}

impl ClassRecord {
    pub fn new(definition: ClassDefinition, is_obfuscated_name: bool) -> Self {
        Self { definition, is_obfuscated_name, signature: OnceLock::new() }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &ClassDefinition {
        &self.definition
    }

    pub fn is_obfuscated_name(&self) -> bool {
        self.is_obfuscated_name
    }

    /// Signature computed by `calculator` on first call and cached afterwards.
    ///
    /// A record is expected to be used with a single calculator configuration.
    pub fn signature(&self, calculator: &SignatureCalculator) -> &Signature {
        self.signature.get_or_init(|| calculator.calculate(&self.definition))
    }
}

/// Read access to a name-keyed set of class records.
///
/// Matching only ever reads through this trait, so a scope can be a plain map or a
/// composed view such as [`ChainedClasses`].
pub trait ClassLookup: Sync {
    fn get_class(&self, name: &str) -> Option<&Arc<ClassRecord>>;

    fn iter_classes(&self) -> Box<dyn Iterator<Item = (&String, &Arc<ClassRecord>)> + Send + '_>;

    fn class_count(&self) -> usize;
}

impl ClassLookup for ClassMap {
    fn get_class(&self, name: &str) -> Option<&Arc<ClassRecord>> {
        self.get(name)
    }

    fn iter_classes(&self) -> Box<dyn Iterator<Item = (&String, &Arc<ClassRecord>)> + Send + '_> {
        Box::new(self.iter())
    }

    fn class_count(&self) -> usize {
        self.len()
    }
}
