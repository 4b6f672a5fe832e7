//! Caching decorator for any [`ObfuscationDetector`].

use std::collections::HashMap;
use std::sync::Mutex;

use crate::obfuscation::ObfuscationDetector;

/// Wraps a detector and caches its answers per identifier.
///
/// The lock is released while the wrapped detector runs, so two threads may classify the
/// same identifier concurrently; both store the same answer.
pub struct MemoizingDetector<D> {
    inner: D,
    classes: Mutex<HashMap<String, bool>>,
    packages: Mutex<HashMap<String, bool>>,
}

impl<D: ObfuscationDetector> MemoizingDetector<D> {
    pub fn new(inner: D) -> Self {
        Self { inner, classes: Mutex::new(HashMap::new()), packages: Mutex::new(HashMap::new()) }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Number of cached class and package answers.
    pub fn cached(&self) -> (usize, usize) {
        (lock(&self.classes).len(), lock(&self.packages).len())
    }
}

fn lock(cache: &Mutex<HashMap<String, bool>>) -> std::sync::MutexGuard<'_, HashMap<String, bool>> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn cached_or_insert(
    cache: &Mutex<HashMap<String, bool>>,
    key: &str,
    compute: impl FnOnce() -> bool,
) -> bool {
    if let Some(hit) = lock(cache).get(key) {
        return *hit;
    }
    let value = compute();
    lock(cache).insert(key.to_string(), value);
    value
}

impl<D: ObfuscationDetector> ObfuscationDetector for MemoizingDetector<D> {
    fn is_class_name_obfuscated(&self, class_name: &str) -> bool {
        cached_or_insert(&self.classes, class_name, || self.inner.is_class_name_obfuscated(class_name))
    }

    fn is_package_name_obfuscated(&self, package_prefix: &str) -> bool {
        cached_or_insert(&self.packages, package_prefix, || {
            self.inner.is_package_name_obfuscated(package_prefix)
        })
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
