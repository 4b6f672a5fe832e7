use tracing::debug;

use crate::matching::{Match, MatchingResult};
use crate::pool::{PackagePool, PackageRecord};

/// Pairs packages whose prefixes are identical and not obfuscated on either side.
///
/// Packages carry no comparable content, so nothing beyond name equality is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageMatcher;

impl PackageMatcher {
    /// Matched packages get rank 0 and leave both pools; everything else is unmatched.
    pub fn match_packages(
        &self,
        mut left: PackagePool,
        mut right: PackagePool,
    ) -> MatchingResult<PackageRecord> {
        let mut result = MatchingResult::default();
        let prefixes: Vec<String> = left.prefixes().map(str::to_string).collect();

        for prefix in prefixes {
            let matchable = match (left.get(&prefix), right.get(&prefix)) {
                (Some(old), Some(new)) => !old.is_obfuscated_name() && !new.is_obfuscated_name(),
                _ => false,
            };
            if !matchable {
                continue;
            }
            if let (Some(old), Some(new)) = (left.remove(&prefix), right.remove(&prefix)) {
                result.matches.insert(prefix, vec![Match::new(old, new, 0.0)]);
            }
        }

        debug!(
            matched = result.matches.len(),
            unmatched_left = left.len(),
            unmatched_right = right.len(),
            "matched packages by name"
        );
        result.unmatched = (left.into_inner(), right.into_inner());
        result
    }
}
