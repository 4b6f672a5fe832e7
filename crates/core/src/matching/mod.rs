//! Staged matching pipeline: package scoping, exact-name matching, signature matching.

pub mod class_matcher;
pub mod package_matcher;
pub mod result;

use std::collections::BTreeMap;

pub use class_matcher::{ClassMatcher, DEFAULT_MAX_CANDIDATES};
pub use package_matcher::PackageMatcher;
pub use result::{Candidate, ClassesMatches};

/// A pairing of a left item with a right item. Lower rank is better; 0 means identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<T> {
    pub left: T,
    pub right: T,
    pub rank: f64,
}

impl<T> Match<T> {
    pub fn new(left: T, right: T, rank: f64) -> Self {
        Self { left, right, rank }
    }
}

/// Matches per left key, plus what was left unmatched on each side.
#[derive(Debug, Clone)]
pub struct MatchingResult<T> {
    /// Ranked matches per left key, best first.
    pub matches: BTreeMap<String, Vec<Match<T>>>,
    /// `(left, right)` items that took part in no match.
    pub unmatched: (BTreeMap<String, T>, BTreeMap<String, T>),
}

impl<T> Default for MatchingResult<T> {
    fn default() -> Self {
        Self { matches: BTreeMap::new(), unmatched: (BTreeMap::new(), BTreeMap::new()) }
    }
}

impl<T> MatchingResult<T> {
    pub fn matched_keys(&self) -> impl Iterator<Item = &str> {
        self.matches.keys().map(String::as_str)
    }
}
