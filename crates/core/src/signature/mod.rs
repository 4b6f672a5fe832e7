//! Class signatures: fixed-shape structural and content fingerprints.

pub mod calculator;
pub mod distance;
pub mod simhash;

use serde::{Deserialize, Serialize};

pub use calculator::{SignatureCalculator, DEFAULT_SHINGLE_SIZE};
pub use distance::{SignatureDistance, SignatureWeights, WeightedSignatureDistance};

/// `superclass_hash` value used when the superclass is absent or its name is obfuscated.
pub const OBFUSCATED_SUPERCLASS_HASH: u64 = 0;

/// Fingerprint of one class.
///
/// A pure function of the class content and the classifier outcome; sub-features derived
/// from obfuscated identifiers never contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub member_count: u64,
    pub method_count: u64,
    pub instructions_count: u64,
    pub members_simhash: u64,
    pub methods_params_simhash: u64,
    pub methods_returns_simhash: u64,
    pub instructions_simhash: u64,
    pub instruction_shingles_simhash: u64,
    pub implemented_interfaces_count: u64,
    pub implemented_interfaces_simhash: u64,
    pub superclass_hash: u64,
    pub string_literals_count: u64,
    pub string_literals_simhash: u64,
}
