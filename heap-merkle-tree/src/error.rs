use thiserror::Error;

/// Errors from Merkle tree construction, proof generation and proof decoding.
///
/// A proof that simply fails to verify is not an error: the verifier returns
/// `false` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleError {
    /// Leaf count is zero, not a power of two, or above `MAX_LEAF_COUNT`.
    #[error("leaf count must be a power of two in [1, 2^32], got {0}")]
    InvalidLeafCount(usize),
    /// Seed bytes have the wrong length or are not valid hex.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    /// Requested leaf does not exist in the tree.
    #[error("leaf index {index} is out of range (leaf count {leaf_count})")]
    LeafIndexOutOfRange {
        /// The requested leaf index.
        index: u32,
        /// Number of leaves in the tree.
        leaf_count: usize,
    },
    /// The proof buffer cannot hold every sibling on the path to the root.
    #[error("proof needs {required} siblings but capacity is {capacity}")]
    ProofCapacity {
        /// Tree depth, i.e. the number of siblings in a full proof.
        required: usize,
        /// Number of siblings the caller allowed.
        capacity: usize,
    },
    /// An encoded proof could not be decoded or is structurally impossible.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
