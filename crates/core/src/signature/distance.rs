//! Weighted distance between two signatures.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::signature::simhash::hamming_distance;
use crate::signature::Signature;

const BUNDLED_WEIGHTS: &str = include_str!("../../data/weights.json");

// Parsed as a plain map: the derived deserializer would recurse into `Default`.
static DEFAULT_WEIGHTS: Lazy<SignatureWeights> = Lazy::new(|| {
    let parsed = serde_json::from_str::<BTreeMap<String, f64>>(BUNDLED_WEIGHTS)
        .map_err(|err| err.to_string())
        .and_then(|entries| {
            entries.iter().try_fold(SignatureWeights::zero(), |weights, (feature, value)| {
                weights.with_feature(feature, *value).map_err(|err| err.to_string())
            })
        });
    parsed.unwrap_or_else(|err| {
        warn!(%err, "bundled signature weights are malformed, using unit weights");
        SignatureWeights::uniform(1.0)
    })
});

/// Capability: a non-negative, symmetric distance between two signatures.
pub trait SignatureDistance: Send + Sync {
    fn distance(&self, a: &Signature, b: &Signature) -> f64;
}

/// Per-feature weights of [`WeightedSignatureDistance`].
///
/// Weights are empirical calibration knobs: they need not sum to one and are never
/// normalised. Missing fields take the bundled default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignatureWeights {
    pub member_count: f64,
    pub method_count: f64,
    pub instructions_count: f64,
    pub members_simhash: f64,
    pub methods_params_simhash: f64,
    pub methods_returns_simhash: f64,
    pub instructions_simhash: f64,
    pub instruction_shingles_simhash: f64,
    pub implemented_interfaces_count: f64,
    pub implemented_interfaces_simhash: f64,
    /// Penalty applied once when the superclass hashes differ.
    pub superclass_hash: f64,
    pub string_literals_count: f64,
    pub string_literals_simhash: f64,
}

impl Default for SignatureWeights {
    fn default() -> Self {
        *DEFAULT_WEIGHTS
    }
}

impl SignatureWeights {
    /// Same weight on every feature.
    pub fn uniform(weight: f64) -> Self {
        Self {
            member_count: weight,
            method_count: weight,
            instructions_count: weight,
            members_simhash: weight,
            methods_params_simhash: weight,
            methods_returns_simhash: weight,
            instructions_simhash: weight,
            instruction_shingles_simhash: weight,
            implemented_interfaces_count: weight,
            implemented_interfaces_simhash: weight,
            superclass_hash: weight,
            string_literals_count: weight,
            string_literals_simhash: weight,
        }
    }

    /// Every weight zero; useful as a base for single-feature distances.
    pub fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// `(feature, weight)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 13] {
        [
            ("member_count", self.member_count),
            ("method_count", self.method_count),
            ("instructions_count", self.instructions_count),
            ("members_simhash", self.members_simhash),
            ("methods_params_simhash", self.methods_params_simhash),
            ("methods_returns_simhash", self.methods_returns_simhash),
            ("instructions_simhash", self.instructions_simhash),
            ("instruction_shingles_simhash", self.instruction_shingles_simhash),
            ("implemented_interfaces_count", self.implemented_interfaces_count),
            ("implemented_interfaces_simhash", self.implemented_interfaces_simhash),
            ("superclass_hash", self.superclass_hash),
            ("string_literals_count", self.string_literals_count),
            ("string_literals_simhash", self.string_literals_simhash),
        ]
    }

    /// Set one weight by feature name.
    pub fn with_feature(mut self, feature: &str, value: f64) -> Result<Self, ConfigError> {
        let slot = match feature {
            "member_count" => &mut self.member_count,
            "method_count" => &mut self.method_count,
            "instructions_count" => &mut self.instructions_count,
            "members_simhash" => &mut self.members_simhash,
            "methods_params_simhash" => &mut self.methods_params_simhash,
            "methods_returns_simhash" => &mut self.methods_returns_simhash,
            "instructions_simhash" => &mut self.instructions_simhash,
            "instruction_shingles_simhash" => &mut self.instruction_shingles_simhash,
            "implemented_interfaces_count" => &mut self.implemented_interfaces_count,
            "implemented_interfaces_simhash" => &mut self.implemented_interfaces_simhash,
            "superclass_hash" => &mut self.superclass_hash,
            "string_literals_count" => &mut self.string_literals_count,
            "string_literals_simhash" => &mut self.string_literals_simhash,
            other => {
                return Err(ConfigError::InvalidOption {
                    option: "weights",
                    reason: format!("unknown signature feature '{other}'"),
                })
            }
        };
        *slot = value;
        Ok(self)
    }

    /// Every weight must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (feature, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistanceWeight { feature, value });
            }
        }
        Ok(())
    }
}

/// Weighted sum of per-feature differences.
///
/// Counts contribute `|a - b| * weight`, fingerprints `hamming(a, b) * weight`, and the
/// superclass a flat penalty when the hashes differ. Two obfuscated superclasses share the
/// same sentinel and therefore count as equal.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSignatureDistance {
    weights: SignatureWeights,
}

impl WeightedSignatureDistance {
    pub fn new(weights: SignatureWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &SignatureWeights {
        &self.weights
    }
}

fn count_term(weight: f64, a: u64, b: u64) -> f64 {
    weight * a.abs_diff(b) as f64
}

fn simhash_term(weight: f64, a: u64, b: u64) -> f64 {
    weight * f64::from(hamming_distance(a, b))
}

impl SignatureDistance for WeightedSignatureDistance {
    fn distance(&self, a: &Signature, b: &Signature) -> f64 {
        let w = &self.weights;
        let superclass = if a.superclass_hash == b.superclass_hash { 0.0 } else { w.superclass_hash };

        count_term(w.member_count, a.member_count, b.member_count)
            + count_term(w.method_count, a.method_count, b.method_count)
            + count_term(w.instructions_count, a.instructions_count, b.instructions_count)
            + simhash_term(w.members_simhash, a.members_simhash, b.members_simhash)
            + simhash_term(w.methods_params_simhash, a.methods_params_simhash, b.methods_params_simhash)
            + simhash_term(
                w.methods_returns_simhash,
                a.methods_returns_simhash,
                b.methods_returns_simhash,
            )
            + simhash_term(w.instructions_simhash, a.instructions_simhash, b.instructions_simhash)
            + simhash_term(
                w.instruction_shingles_simhash,
                a.instruction_shingles_simhash,
                b.instruction_shingles_simhash,
            )
            + count_term(
                w.implemented_interfaces_count,
                a.implemented_interfaces_count,
                b.implemented_interfaces_count,
            )
            + simhash_term(
                w.implemented_interfaces_simhash,
                a.implemented_interfaces_simhash,
                b.implemented_interfaces_simhash,
            )
            + superclass
            + count_term(w.string_literals_count, a.string_literals_count, b.string_literals_count)
            + simhash_term(
                w.string_literals_simhash,
                a.string_literals_simhash,
                b.string_literals_simhash,
            )
    }
}
