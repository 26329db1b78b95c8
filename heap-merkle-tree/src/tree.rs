use log::debug;
use rayon::prelude::*;

use crate::{
    Digest, MerkleError, Seed,
    hash::{combine, depth_for_leaf_count, leaf_hash, validate_leaf_count},
};

/// A complete binary Merkle tree over `leaf_count` seeded leaves.
///
/// Digests are stored in a single heap-indexed array of `2 * leaf_count - 1`
/// entries: root=0, left child=2i+1, right child=2i+2, leaf `l` at
/// `leaf_count - 1 + l`. The tree has no mutating methods once built, so a
/// `&MerkleTree` can be shared freely between proof-generating threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    leaf_count: usize,
    nodes: Vec<Digest>,
}

impl MerkleTree {
    /// Build the tree sequentially, bottom-up.
    ///
    /// `leaf_count` must be a power of two; anything else is rejected with
    /// [`MerkleError::InvalidLeafCount`].
    pub fn build(seed: &Seed, leaf_count: usize) -> Result<Self, MerkleError> {
        validate_leaf_count(leaf_count)?;
        let first_leaf = leaf_count - 1;
        let mut nodes = vec![[0u8; 32]; 2 * leaf_count - 1];

        for (index, node) in nodes[first_leaf..].iter_mut().enumerate() {
            *node = leaf_hash(seed, index as u32);
        }

        // Children of `i` are always at higher positions, so a descending
        // sweep sees both of them before `i`.
        for i in (0..first_leaf).rev() {
            nodes[i] = combine(&nodes[2 * i + 1], &nodes[2 * i + 2]);
        }

        let tree = Self { leaf_count, nodes };
        debug!(
            "built merkle tree: leaves={} root={}",
            leaf_count,
            hex::encode(tree.root())
        );
        Ok(tree)
    }

    /// Build the tree with rayon, producing exactly the same nodes as
    /// [`build`](Self::build).
    ///
    /// Leaves are hashed in parallel. Each internal level is then hashed in
    /// parallel once the level below it is complete.
    pub fn par_build(seed: &Seed, leaf_count: usize) -> Result<Self, MerkleError> {
        validate_leaf_count(leaf_count)?;
        let depth = depth_for_leaf_count(leaf_count);
        let mut nodes = vec![[0u8; 32]; 2 * leaf_count - 1];

        nodes[leaf_count - 1..]
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, node)| *node = leaf_hash(seed, index as u32));

        // Level `d` occupies positions [2^d - 1, 2^(d+1) - 1).
        for level in (0..depth).rev() {
            let level_start = (1usize << level) - 1;
            let child_start = (1usize << (level + 1)) - 1;
            let (upper, lower) = nodes.split_at_mut(child_start);
            upper[level_start..]
                .par_iter_mut()
                .zip(lower[..1usize << (level + 1)].par_chunks(2))
                .for_each(|(parent, children)| *parent = combine(&children[0], &children[1]));
        }

        let tree = Self { leaf_count, nodes };
        debug!(
            "built merkle tree in parallel: leaves={} root={}",
            leaf_count,
            hex::encode(tree.root())
        );
        Ok(tree)
    }

    /// The root digest, the public commitment to every leaf.
    pub fn root(&self) -> &Digest {
        &self.nodes[0]
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of levels between a leaf and the root, `log2(leaf_count)`.
    ///
    /// This is also the length of every inclusion proof.
    pub fn depth(&self) -> usize {
        depth_for_leaf_count(self.leaf_count)
    }

    /// Total number of stored digests, `2 * leaf_count - 1`.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Digest at a heap array position.
    pub fn node(&self, position: usize) -> Option<&Digest> {
        self.nodes.get(position)
    }

    /// Digest of leaf `index`.
    pub fn leaf(&self, index: u32) -> Option<&Digest> {
        if index as usize >= self.leaf_count {
            return None;
        }
        self.nodes.get(self.leaf_count - 1 + index as usize)
    }

    /// All digests in heap order.
    pub(crate) fn nodes(&self) -> &[Digest] {
        &self.nodes
    }
}
