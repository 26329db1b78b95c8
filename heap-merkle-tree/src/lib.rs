//! Seeded binary Merkle tree with compact inclusion proofs, using Blake3.
//!
//! A complete binary tree over `N` leaves (`N` a power of two) stored as a
//! flat heap-indexed array of `2N - 1` digests: root at 0, children of `i` at
//! `2i + 1` and `2i + 2`, leaf `l` at `N - 1 + l`.
//!
//! - Leaf digest:     `blake3(seed || index_le32)`
//! - Internal digest: `blake3(left || right)`
//!
//! The tree is built once and is read-only afterwards. An inclusion proof is
//! the `log2(N)` sibling digests on the path from a leaf to the root, and can
//! be checked against the root alone with [`verify`] or
//! [`verify_with_seed`].

#![warn(missing_docs)]

mod error;
pub(crate) mod hash;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;


pub use error::MerkleError;
pub use hash::{
    DIGEST_LEN, Digest, MAX_LEAF_COUNT, SEED_LEN, Seed, combine, leaf_hash, validate_leaf_count,
};
pub use proof::InclusionProof;
pub use tree::MerkleTree;
pub use verify::{verify, verify_with_seed};
