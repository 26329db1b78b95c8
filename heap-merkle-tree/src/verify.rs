//! Proof verification.
//!
//! Pure functions, no tree required. Recomputes the root from a leaf digest
//! and its sibling path and compares it to the expected root. Every kind of
//! malformed input yields `false` rather than an error.

use crate::{
    Digest, Seed,
    hash::{combine, depth_for_leaf_count, leaf_hash, leaf_position, validate_leaf_count},
};

/// Verify that `leaf` sits at `leaf_index` in a tree of `leaf_count` leaves
/// whose root is `expected_root`.
///
/// Returns `false` when `leaf_count` is not a valid power of two, the index is
/// out of range, or `proof` does not hold exactly `log2(leaf_count)` digests.
pub fn verify(
    expected_root: &Digest,
    leaf_index: u32,
    leaf_count: usize,
    leaf: &Digest,
    proof: &[Digest],
) -> bool {
    if validate_leaf_count(leaf_count).is_err() || leaf_index as u64 >= leaf_count as u64 {
        return false;
    }
    if proof.len() != depth_for_leaf_count(leaf_count) {
        return false;
    }

    let mut current = *leaf;
    let mut node = leaf_position(leaf_count, leaf_index);
    for sibling in proof {
        current = if node % 2 == 1 {
            combine(&current, sibling)
        } else {
            combine(sibling, &current)
        };
        node = (node - 1) / 2;
    }

    &current == expected_root
}

/// Like [`verify`], recomputing the leaf digest from `seed` and `leaf_index`.
pub fn verify_with_seed(
    expected_root: &Digest,
    seed: &Seed,
    leaf_index: u32,
    leaf_count: usize,
    proof: &[Digest],
) -> bool {
    let leaf = leaf_hash(seed, leaf_index);
    verify(expected_root, leaf_index, leaf_count, &leaf, proof)
}
