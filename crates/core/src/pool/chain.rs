//! Chained lookup over several class maps.

use std::sync::Arc;

use crate::pool::{ClassLookup, ClassMap, ClassRecord};

/// Read-only view over several class maps, searched in order.
///
/// Used for the leftover scope so the remaining per-package maps need not be copied into
/// one map. The view only hands out shared references.
#[derive(Debug, Clone, Default)]
pub struct ChainedClasses<'a> {
    maps: Vec<&'a ClassMap>,
}

impl<'a> ChainedClasses<'a> {
    pub fn new(maps: Vec<&'a ClassMap>) -> Self {
        Self { maps }
    }

    pub fn push(&mut self, map: &'a ClassMap) {
        self.maps.push(map);
    }

    pub fn len(&self) -> usize {
        self.maps.iter().map(|map| map.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(|map| map.is_empty())
    }
}

impl<'a> FromIterator<&'a ClassMap> for ChainedClasses<'a> {
    fn from_iter<I: IntoIterator<Item = &'a ClassMap>>(iter: I) -> Self {
        Self { maps: iter.into_iter().collect() }
    }
}

impl ClassLookup for ChainedClasses<'_> {
    fn get_class(&self, name: &str) -> Option<&Arc<ClassRecord>> {
        self.maps.iter().find_map(|map| map.get(name))
    }

    fn iter_classes(&self) -> Box<dyn Iterator<Item = (&String, &Arc<ClassRecord>)> + Send + '_> {
        Box::new(self.maps.iter().flat_map(|map| map.iter()))
    }

    fn class_count(&self) -> usize {
        self.len()
    }
}
