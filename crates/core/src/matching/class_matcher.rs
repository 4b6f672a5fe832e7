//! Class matching: the top-level pipeline.
//!
//! Each scope (a matched package pair, then the merged leftovers) runs two phases:
//!
//! 1. exact-name matching of classes whose names are not obfuscated on either side, ranked
//!    by their actual signature distance;
//! 2. nearest-neighbour signature matching of everything still unmatched, keeping the
//!    `max_candidates` closest right classes per left class.
//!
//! Right classes are not consumed in phase 2: one right class may be the best candidate
//! of several left classes. Package pairs are matched independently and in parallel.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::matching::{ClassesMatches, Match, MatchingResult, PackageMatcher};
use crate::obfuscation::ObfuscationDetector;
use crate::pool::{ChainedClasses, ClassLookup, ClassMap, ClassPool, ClassRecord, PackageRecord};
use crate::signature::{SignatureCalculator, SignatureDistance};

/// Default number of candidates kept per class.
pub const DEFAULT_MAX_CANDIDATES: usize = 3;

type ClassMatch = Match<Arc<ClassRecord>>;

pub struct ClassMatcher {
    detector: Arc<dyn ObfuscationDetector>,
    calculator: SignatureCalculator,
    distance: Arc<dyn SignatureDistance>,
    max_candidates: usize,
    match_packages: bool,
    match_by_name: bool,
}

impl ClassMatcher {
    /// Matcher with package scoping and name matching enabled and the default K.
    ///
    /// Signatures are computed with `calculator`, which should share `detector`.
    pub fn new(
        detector: Arc<dyn ObfuscationDetector>,
        calculator: SignatureCalculator,
        distance: Arc<dyn SignatureDistance>,
    ) -> Self {
        Self {
            detector,
            calculator,
            distance,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            match_packages: true,
            match_by_name: true,
        }
    }

    /// K must be at least one.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Result<Self, ConfigError> {
        if max_candidates == 0 {
            return Err(ConfigError::InvalidOption {
                option: "max_candidates",
                reason: "must be at least 1".to_string(),
            });
        }
        self.max_candidates = max_candidates;
        Ok(self)
    }

    pub fn with_package_matching(mut self, enabled: bool) -> Self {
        self.match_packages = enabled;
        self
    }

    pub fn with_name_matching(mut self, enabled: bool) -> Self {
        self.match_by_name = enabled;
        self
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    pub fn calculator(&self) -> &SignatureCalculator {
        &self.calculator
    }

    /// Match every class of `old` against `new`.
    ///
    /// Every left class appears in the output, possibly with no candidates.
    pub fn find_classes_matches(&self, old: &ClassPool, new: &ClassPool) -> ClassesMatches {
        let started = Instant::now();
        let mut output = ClassesMatches::new();

        if !self.match_packages {
            let scope = self.match_scope(old.classes(), new.classes());
            record_scope(&mut output, scope);
            info!(classes = output.len(), elapsed = ?started.elapsed(), "matched classes without package scoping");
            return output;
        }

        let packages = PackageMatcher.match_packages(
            old.split_by_package(self.detector.as_ref()),
            new.split_by_package(self.detector.as_ref()),
        );
        let pairs: Vec<(&PackageRecord, &PackageRecord)> = packages
            .matches
            .values()
            .flatten()
            .map(|package_match| (&package_match.left, &package_match.right))
            .collect();

        let scoped: Vec<(ClassesMatches, ClassMap, ClassMap)> = pairs
            .par_iter()
            .map(|(left, right)| {
                debug!(package = left.name_prefix(), "matching package scope");
                let MatchingResult { matches, unmatched: (rest_left, rest_right) } =
                    self.match_scope(left.classes(), right.classes());
                let mut found = ClassesMatches::new();
                found.extend_from_scope(MatchingResult { matches, ..Default::default() });
                (found, rest_left, rest_right)
            })
            .collect();
        debug!(scopes = scoped.len(), elapsed = ?started.elapsed(), "matched package scopes");

        let mut leftover_left: Vec<ClassMap> = Vec::new();
        let mut leftover_right: Vec<ClassMap> = Vec::new();
        for (found, rest_left, rest_right) in scoped {
            output.merge(found);
            leftover_left.push(rest_left);
            leftover_right.push(rest_right);
        }

        let (unmatched_left, unmatched_right) = &packages.unmatched;
        let left_view: ChainedClasses<'_> = unmatched_left
            .values()
            .map(PackageRecord::classes)
            .chain(leftover_left.iter())
            .collect();
        let right_view: ChainedClasses<'_> = unmatched_right
            .values()
            .map(PackageRecord::classes)
            .chain(leftover_right.iter())
            .collect();
        debug!(left = left_view.len(), right = right_view.len(), "matching leftover scope");

        let leftover = self.match_scope(&left_view, &right_view);
        record_scope(&mut output, leftover);

        info!(
            classes = output.len(),
            package_pairs = pairs.len(),
            elapsed = ?started.elapsed(),
            "matched classes"
        );
        output
    }

    /// Run both phases over one scope.
    ///
    /// Unmatched left classes are those that got no candidate at all; unmatched right
    /// classes were neither name-matched nor selected as any candidate.
    pub fn match_scope<L, R>(&self, left: &L, right: &R) -> MatchingResult<Arc<ClassRecord>>
    where
        L: ClassLookup + ?Sized,
        R: ClassLookup + ?Sized,
    {
        let mut result = MatchingResult::default();
        let mut name_matched: HashSet<&str> = HashSet::new();

        if self.match_by_name {
            for (name, record) in left.iter_classes() {
                if record.is_obfuscated_name() {
                    continue;
                }
                let Some(counterpart) = right.get_class(name) else {
                    continue;
                };
                if counterpart.is_obfuscated_name() {
                    continue;
                }
                let rank = self.rank(record, counterpart);
                result
                    .matches
                    .insert(name.clone(), vec![Match::new(Arc::clone(record), Arc::clone(counterpart), rank)]);
                name_matched.insert(name.as_str());
            }
        }

        let remaining_left: Vec<(&String, &Arc<ClassRecord>)> =
            left.iter_classes().filter(|(name, _)| !name_matched.contains(name.as_str())).collect();
        let remaining_right: Vec<(&String, &Arc<ClassRecord>)> =
            right.iter_classes().filter(|(name, _)| !name_matched.contains(name.as_str())).collect();

        let nearest: Vec<Vec<(usize, f64)>> = remaining_left
            .par_iter()
            .map(|(_, record)| self.nearest(record, &remaining_right))
            .collect();

        let mut selected = vec![false; remaining_right.len()];
        for ((name, record), candidates) in remaining_left.iter().zip(nearest) {
            if candidates.is_empty() {
                result.unmatched.0.insert((*name).clone(), Arc::clone(record));
                continue;
            }
            let matches: Vec<ClassMatch> = candidates
                .into_iter()
                .map(|(index, rank)| {
                    selected[index] = true;
                    Match::new(Arc::clone(record), Arc::clone(remaining_right[index].1), rank)
                })
                .collect();
            result.matches.insert((*name).clone(), matches);
        }

        for ((name, record), _) in
            remaining_right.iter().zip(&selected).filter(|(_, selected)| !**selected)
        {
            result.unmatched.1.insert((*name).clone(), Arc::clone(record));
        }

        debug!(
            by_name = name_matched.len(),
            by_signature = result.matches.len() - name_matched.len(),
            unmatched_left = result.unmatched.0.len(),
            unmatched_right = result.unmatched.1.len(),
            "matched scope"
        );
        result
    }

    fn rank(&self, left: &ClassRecord, right: &ClassRecord) -> f64 {
        self.distance.distance(left.signature(&self.calculator), right.signature(&self.calculator))
    }

    /// Indices and ranks of the K closest right classes, ascending. Ties keep right-side
    /// iteration order.
    fn nearest(&self, left: &ClassRecord, right: &[(&String, &Arc<ClassRecord>)]) -> Vec<(usize, f64)> {
        let mut best: Vec<(usize, f64)> = Vec::with_capacity(self.max_candidates + 1);
        for (index, (_, candidate)) in right.iter().enumerate() {
            let rank = self.rank(left, candidate);
            if best.len() == self.max_candidates && best.last().is_some_and(|(_, worst)| *worst <= rank) {
                continue;
            }
            let at = best.partition_point(|(_, kept)| *kept <= rank);
            best.insert(at, (index, rank));
            best.truncate(self.max_candidates);
        }
        best
    }
}

/// Fold one final scope into the output; left classes without candidates get an empty entry.
fn record_scope(output: &mut ClassesMatches, scope: MatchingResult<Arc<ClassRecord>>) {
    let unmatched: Vec<String> = scope.unmatched.0.keys().cloned().collect();
    output.extend_from_scope(MatchingResult { matches: scope.matches, ..Default::default() });
    for name in unmatched {
        output.insert(name, Vec::new());
    }
}
