//! Inclusion proof generation.
//!
//! A proof for leaf `l` is the ordered list of sibling digests met while
//! climbing from heap position `leaf_count - 1 + l` to the root. Entry `d` is
//! the sibling at climb step `d`, so the leaf's own sibling comes first.

use bincode::{Decode, Encode};
use log::trace;

use crate::{
    Digest, MerkleError, MerkleTree, Seed,
    hash::{depth_for_leaf_count, validate_leaf_count},
    verify::verify_with_seed,
};


/// Upper bound on an encoded proof. A full-depth proof over `2^32` leaves is
/// a little over 1 KiB.
const MAX_ENCODED_PROOF_BYTES: usize = 64 * 1024;

/// A self-describing inclusion proof for one leaf.
///
/// Carries the leaf index and leaf count alongside the sibling digests, so a
/// verifier needs only the expected root and the seed.
///
/// Fields are `pub(crate)`; use [`MerkleTree::proof`] to create proofs and
/// [`decode_from_slice`](InclusionProof::decode_from_slice) to deserialize
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct InclusionProof {
    pub(crate) leaf_index: u32,
    pub(crate) leaf_count: u64,
    pub(crate) siblings: Vec<Digest>,
}

impl InclusionProof {
    /// The proved leaf index.
    pub fn leaf_index(&self) -> u32 {
        self.leaf_index
    }

    /// Leaf count of the tree the proof was generated from.
    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    /// Sibling digests, leaf level first.
    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    /// Check the proof against an expected root, recomputing the leaf digest
    /// from `seed`.
    pub fn verify(&self, expected_root: &Digest, seed: &Seed) -> bool {
        let Ok(leaf_count) = usize::try_from(self.leaf_count) else {
            return false;
        };
        verify_with_seed(
            expected_root,
            seed,
            self.leaf_index,
            leaf_count,
            &self.siblings,
        )
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects trailing bytes and proofs that could not have come from any
    /// tree: a leaf count that is not a power of two, an out-of-range leaf
    /// index, or a sibling count different from the tree depth.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ MAX_ENCODED_PROOF_BYTES }>();
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }

        let leaf_count = usize::try_from(proof.leaf_count).map_err(|_| {
            MerkleError::InvalidProof(format!(
                "leaf count {} does not fit this platform",
                proof.leaf_count
            ))
        })?;
        validate_leaf_count(leaf_count).map_err(|e| MerkleError::InvalidProof(e.to_string()))?;
        if proof.leaf_index as u64 >= proof.leaf_count {
            return Err(MerkleError::InvalidProof(format!(
                "leaf index {} is out of range (leaf count {})",
                proof.leaf_index, proof.leaf_count
            )));
        }
        let depth = depth_for_leaf_count(leaf_count);
        if proof.siblings.len() != depth {
            return Err(MerkleError::InvalidProof(format!(
                "expected {} siblings for leaf count {}, got {}",
                depth,
                proof.leaf_count,
                proof.siblings.len()
            )));
        }
        Ok(proof)
    }
}

impl MerkleTree {
    /// Collect the sibling digests for `leaf_index`, leaf level first.
    ///
    /// Fails with [`MerkleError::ProofCapacity`] when the tree is deeper than
    /// `max_depth`; a truncated path is never returned.
    pub fn build_proof(
        &self,
        leaf_index: u32,
        max_depth: usize,
    ) -> Result<Vec<Digest>, MerkleError> {
        self.check_proof_request(leaf_index, max_depth)?;
        let mut siblings = Vec::with_capacity(self.depth());
        for_each_sibling(self, leaf_index, |sibling| siblings.push(*sibling));
        Ok(siblings)
    }

    /// Write the sibling digests for `leaf_index` into `out`, returning how
    /// many were written (always [`depth`](Self::depth)).
    ///
    /// `out` may be longer than needed; entries past the depth are left
    /// untouched.
    pub fn write_proof(&self, leaf_index: u32, out: &mut [Digest]) -> Result<usize, MerkleError> {
        self.check_proof_request(leaf_index, out.len())?;
        let mut written = 0;
        for_each_sibling(self, leaf_index, |sibling| {
            out[written] = *sibling;
            written += 1;
        });
        Ok(written)
    }

    /// Generate a self-describing [`InclusionProof`] for `leaf_index`.
    pub fn proof(&self, leaf_index: u32) -> Result<InclusionProof, MerkleError> {
        let siblings = self.build_proof(leaf_index, self.depth())?;
        Ok(InclusionProof {
            leaf_index,
            leaf_count: self.leaf_count() as u64,
            siblings,
        })
    }

    fn check_proof_request(&self, leaf_index: u32, capacity: usize) -> Result<(), MerkleError> {
        if leaf_index as usize >= self.leaf_count() {
            return Err(MerkleError::LeafIndexOutOfRange {
                index: leaf_index,
                leaf_count: self.leaf_count(),
            });
        }
        let required = self.depth();
        if required > capacity {
            return Err(MerkleError::ProofCapacity { required, capacity });
        }
        Ok(())
    }
}

/// Walk from the leaf to the root, passing each sibling digest to `f`.
///
/// In this layout a node at an odd position is a left child (sibling at
/// `node + 1`) and a non-root node at an even position is a right child
/// (sibling at `node - 1`).
fn for_each_sibling(tree: &MerkleTree, leaf_index: u32, mut f: impl FnMut(&Digest)) {
    let nodes = tree.nodes();
    let mut node = tree.leaf_count() - 1 + leaf_index as usize;
    while node > 0 {
        let sibling = if node % 2 == 0 { node - 1 } else { node + 1 };
        f(&nodes[sibling]);
        node = (node - 1) / 2;
    }
    trace!(
        "generated proof for leaf {} of {}",
        leaf_index,
        tree.leaf_count()
    );
}
