//! Digest and seed types, the two Blake3 hashing shapes, and leaf count
//! validation.
//!
//! Leaf and internal inputs are told apart only by their length (36 vs 64
//! bytes); there is no domain tag byte.

use crate::MerkleError;

/// Length in bytes of every digest in the tree.
pub const DIGEST_LEN: usize = 32;

/// Length in bytes of the tree seed.
pub const SEED_LEN: usize = 32;

/// Largest supported leaf count; leaf indices are `u32`.
pub const MAX_LEAF_COUNT: u64 = 1 << 32;

/// A 32-byte Blake3 digest.
pub type Digest = [u8; DIGEST_LEN];

/// The 32-byte seed every leaf digest is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap raw seed bytes.
    pub const fn new(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a seed from a slice, which must be exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        let bytes: [u8; SEED_LEN] = bytes.try_into().map_err(|_| {
            MerkleError::InvalidSeed(format!(
                "expected {} bytes, got {}",
                SEED_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Parse a seed from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, MerkleError> {
        let bytes = hex::decode(s).map_err(|e| MerkleError::InvalidSeed(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// The raw seed bytes.
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl From<[u8; SEED_LEN]> for Seed {
    fn from(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }
}

/// Compute a leaf digest: `blake3(seed || index_le32)`.
pub fn leaf_hash(seed: &Seed, index: u32) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(seed.as_bytes());
    hasher.update(&index.to_le_bytes());
    *hasher.finalize().as_bytes()
}

/// Compute a parent digest from its children: `blake3(left || right)`.
///
/// Not commutative; `left` must be the child at `2i + 1`.
pub fn combine(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// Validate that `leaf_count` is a power of two in `[1, MAX_LEAF_COUNT]`.
pub fn validate_leaf_count(leaf_count: usize) -> Result<(), MerkleError> {
    if !leaf_count.is_power_of_two() || leaf_count as u64 > MAX_LEAF_COUNT {
        return Err(MerkleError::InvalidLeafCount(leaf_count));
    }
    Ok(())
}

/// Tree depth for a validated leaf count, `log2(leaf_count)`.
pub(crate) fn depth_for_leaf_count(leaf_count: usize) -> usize {
    leaf_count.trailing_zeros() as usize
}

/// Heap array position of leaf `index`.
///
/// Uses u64 so `leaf_count - 1 + index` cannot overflow on 32-bit targets.
pub(crate) fn leaf_position(leaf_count: usize, index: u32) -> u64 {
    (leaf_count as u64 - 1) + index as u64
}
