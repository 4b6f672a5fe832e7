//! Class filters applied to a pool before matching.

use serde::{Deserialize, Serialize};

use crate::pool::ClassRecord;

/// Platform and support-library namespaces excluded by default.
pub const DEFAULT_EXCLUDE_PREFIXES: &[&str] = &[
    "Landroid/",
    "Lcom/android/internal/util",
    "Ldalvik/",
    "Ljava/",
    "Ljavax/",
    "Lorg/apache/",
    "Lorg/json/",
    "Lorg/w3c/dom/",
    "Lorg/xml/sax",
    "Lorg/xmlpull/v1/",
    "Ljunit/",
    "Landroidx/",
];

/// Predicate over `(name, record)`; `true` keeps the class.
pub trait ClassFilter: Send + Sync {
    fn keep(&self, name: &str, record: &ClassRecord) -> bool;
}

impl<F> ClassFilter for F
where
    F: Fn(&str, &ClassRecord) -> bool + Send + Sync,
{
    fn keep(&self, name: &str, record: &ClassRecord) -> bool {
        self(name, record)
    }
}

/// Drops classes under excluded prefixes and, when includes are set, anything outside them.
///
/// Array markers are ignored when comparing, so `[Landroidx/Foo;` is excluded along with
/// `Landroidx/Foo;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixFilter {
    exclude: Vec<String>,
    include: Vec<String>,
}

impl PrefixFilter {
    pub fn new(exclude: Vec<String>, include: Vec<String>) -> Self {
        Self { exclude, include }
    }
}

impl ClassFilter for PrefixFilter {
    fn keep(&self, name: &str, _record: &ClassRecord) -> bool {
        let element = name.trim_start_matches('[');
        if self.exclude.iter().any(|prefix| element.starts_with(prefix.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|prefix| element.starts_with(prefix.as_str()))
    }
}

/// Drops array classes such as `[Lcom/app/Foo;`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayClassFilter;

impl ClassFilter for ArrayClassFilter {
    fn keep(&self, name: &str, _record: &ClassRecord) -> bool {
        !name.starts_with('[')
    }
}

/// Filter options of a match run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub exclude_prefixes: Vec<String>,
    /// Empty keeps every class that is not excluded.
    pub include_prefixes: Vec<String>,
    pub exclude_arrays: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_prefixes: DEFAULT_EXCLUDE_PREFIXES.iter().map(|p| p.to_string()).collect(),
            include_prefixes: Vec::new(),
            exclude_arrays: true,
        }
    }
}

impl FilterConfig {
    /// Filters described by this configuration, in application order.
    pub fn build(&self) -> Vec<Box<dyn ClassFilter>> {
        let mut filters: Vec<Box<dyn ClassFilter>> = Vec::new();
        if self.exclude_arrays {
            filters.push(Box::new(ArrayClassFilter));
        }
        if !self.exclude_prefixes.is_empty() || !self.include_prefixes.is_empty() {
            filters.push(Box::new(PrefixFilter::new(
                self.exclude_prefixes.clone(),
                self.include_prefixes.clone(),
            )));
        }
        filters
    }
}

/// True if every filter keeps the class.
pub fn keep_all(filters: &[Box<dyn ClassFilter>], name: &str, record: &ClassRecord) -> bool {
    filters.iter().all(|filter| filter.keep(name, record))
}
