//! # Hashing
//!
//! SHA-256 is the one and only digest in the Meridian protocol. Transaction
//! hashes, Merkle nodes, and derived key material all flow through it, and
//! the validating network reconstructs every one of those digests
//! independently — so there is no room for a second algorithm or a
//! per-deployment toggle. One function, 32 bytes out, everywhere.
//!
//! ## Merkle tie-break
//!
//! The Merkle construction here pairs an odd trailing node with *itself*
//! (duplicate-then-hash), the same way Bitcoin does. Some implementations
//! promote the odd node unhashed instead; the two variants produce different
//! roots for the same leaves. The duplication rule is what the network
//! computes, so it is what we compute.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of the input.
///
/// Deterministic, side-effect free, and the basis of every other digest in
/// this crate.
///
/// # Example
///
/// ```
/// use meridian_sdk::crypto::hash::sha256;
///
/// let digest = sha256(b"meridian");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// SHA-256 as a lowercase hex string. 64 characters.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Hash multiple byte slices as if they were concatenated.
///
/// Feeds the parts sequentially into one hasher instead of allocating a
/// joined buffer. Used for Merkle parent nodes (`left ‖ right`).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the Merkle root over an ordered list of 32-byte digests.
///
/// Rules, in order:
///
/// - Empty list → `sha256(b"")`. A real digest of empty input, not a zero
///   sentinel — the empty-block transaction root is still a hash.
/// - Single element → that element, unchanged. No re-hashing.
/// - Otherwise: combine adjacent pairs left to right as
///   `sha256(left ‖ right)`; an odd element at the end of a level is paired
///   with itself. Repeat until one digest remains.
///
/// Order matters: swapping two leaves changes the root, which is exactly
/// what block producers rely on to commit to transaction ordering.
pub fn merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    if leaves.is_empty() {
        return sha256(b"");
    }
    if leaves.len() == 1 {
        return leaves[0];
    }

    let mut current_level: Vec<[u8; 32]> = leaves.to_vec();

    while current_level.len() > 1 {
        let mut next_level = Vec::with_capacity(current_level.len().div_ceil(2));

        for chunk in current_level.chunks(2) {
            let left = &chunk[0];
            // Odd count: the last element is its own sibling.
            let right = if chunk.len() == 2 { &chunk[1] } else { &chunk[0] };
            next_level.push(sha256_multi(&[left.as_slice(), right.as_slice()]));
        }

        current_level = next_level;
    }

    current_level[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256 of the empty string — the canonical test vector.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_deterministic() {
        assert_eq!(sha256(b"meridian"), sha256(b"meridian"));
        assert_ne!(sha256(b"meridian"), sha256(b"Meridian"));
    }

    #[test]
    fn multi_matches_concatenation() {
        let multi = sha256_multi(&[b"hello", b" world"]);
        assert_eq!(multi, sha256(b"hello world"));
    }

    #[test]
    fn merkle_empty_is_hash_of_empty_input() {
        assert_eq!(merkle_root(&[]), sha256(b""));
        assert_ne!(merkle_root(&[]), [0u8; 32]);
    }

    #[test]
    fn merkle_single_leaf_unchanged() {
        let leaf = sha256(b"only child");
        assert_eq!(merkle_root(&[leaf]), leaf);
    }

    #[test]
    fn merkle_two_leaves() {
        let a = sha256(b"left");
        let b = sha256(b"right");
        let expected = sha256_multi(&[a.as_slice(), b.as_slice()]);
        assert_eq!(merkle_root(&[a, b]), expected);
    }

    #[test]
    fn merkle_three_leaves_duplicates_the_odd_one() {
        let h1 = sha256(b"one");
        let h2 = sha256(b"two");
        let h3 = sha256(b"three");

        let left = sha256_multi(&[h1.as_slice(), h2.as_slice()]);
        let right = sha256_multi(&[h3.as_slice(), h3.as_slice()]);
        let expected = sha256_multi(&[left.as_slice(), right.as_slice()]);

        assert_eq!(merkle_root(&[h1, h2, h3]), expected);
    }

    #[test]
    fn merkle_order_matters() {
        let a = sha256(b"first");
        let b = sha256(b"second");
        assert_ne!(merkle_root(&[a, b]), merkle_root(&[b, a]));
    }

    #[test]
    fn merkle_deterministic_over_many_leaves() {
        let leaves: Vec<[u8; 32]> = (0u8..9).map(|i| sha256(&[i])).collect();
        assert_eq!(merkle_root(&leaves), merkle_root(&leaves));
    }
}
