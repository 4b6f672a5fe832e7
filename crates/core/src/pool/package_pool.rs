//! Package records and the per-version package pool.

use std::collections::btree_map::{self, BTreeMap};
use std::sync::Arc;

use crate::model::descriptor::package_leaf_name;
use crate::pool::{ClassMap, ClassRecord};

/// Classes sharing one parent package prefix.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    name_prefix: String,
    is_obfuscated_name: bool,
    classes: ClassMap,
}

impl PackageRecord {
    pub fn new(name_prefix: impl Into<String>, is_obfuscated_name: bool) -> Self {
        Self { name_prefix: name_prefix.into(), is_obfuscated_name, classes: ClassMap::new() }
    }

    pub fn add_class(&mut self, record: Arc<ClassRecord>) {
        self.classes.insert(record.name().to_string(), record);
    }

    /// Prefix such as `Lcom/app`; the root package is `""`.
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    pub fn leaf_name(&self) -> &str {
        package_leaf_name(&self.name_prefix)
    }

    pub fn is_obfuscated_name(&self) -> bool {
        self.is_obfuscated_name
    }

    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }
}

/// Package prefix to package record for one version.
#[derive(Debug, Clone, Default)]
pub struct PackagePool {
    packages: BTreeMap<String, PackageRecord>,
}

impl PackagePool {
    pub fn entry(&mut self, prefix: &str) -> btree_map::Entry<'_, String, PackageRecord> {
        self.packages.entry(prefix.to_string())
    }

    pub fn insert(&mut self, record: PackageRecord) -> Option<PackageRecord> {
        self.packages.insert(record.name_prefix.clone(), record)
    }

    pub fn get(&self, prefix: &str) -> Option<&PackageRecord> {
        self.packages.get(prefix)
    }

    pub fn remove(&mut self, prefix: &str) -> Option<PackageRecord> {
        self.packages.remove(prefix)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.packages.contains_key(prefix)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PackageRecord)> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Total number of classes over every package.
    pub fn class_count(&self) -> usize {
        self.packages.values().map(|package| package.classes.len()).sum()
    }

    pub fn into_inner(self) -> BTreeMap<String, PackageRecord> {
        self.packages
    }
}

impl From<BTreeMap<String, PackageRecord>> for PackagePool {
    fn from(packages: BTreeMap<String, PackageRecord>) -> Self {
        Self { packages }
    }
}
