//! 64-bit simhash fingerprints.
//!
//! Each token is hashed with SHA-256 (first eight bytes, big-endian). The fingerprint sets a
//! bit iff more tokens have that bit set than not, so near-identical token multisets land a
//! small Hamming distance apart.

use sha2::{Digest, Sha256};

/// Number of bits in a fingerprint.
pub const FINGERPRINT_BITS: usize = 64;

/// Fingerprint of an empty token sequence.
pub const EMPTY_FINGERPRINT: u64 = 0;

/// Stable 64-bit hash of one token.
pub fn token_hash(token: impl AsRef<[u8]>) -> u64 {
    let digest = Sha256::digest(token.as_ref());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Combine token hashes by per-bit majority vote.
pub fn combine<I>(hashes: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let mut votes = [0i64; FINGERPRINT_BITS];
    for hash in hashes {
        for (bit, vote) in votes.iter_mut().enumerate() {
            if hash & (1u64 << bit) != 0 {
                *vote += 1;
            } else {
                *vote -= 1;
            }
        }
    }

    votes
        .iter()
        .enumerate()
        .filter(|(_, vote)| **vote > 0)
        .fold(EMPTY_FINGERPRINT, |fingerprint, (bit, _)| fingerprint | (1u64 << bit))
}

/// Simhash of a token sequence; order does not matter, multiplicity does.
pub fn simhash<I, T>(tokens: I) -> u64
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    combine(tokens.into_iter().map(token_hash))
}

pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}
