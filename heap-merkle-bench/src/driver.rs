//! The build → prove → verify loop and its checksum.

use std::time::Instant;

use anyhow::{Context, Result};
use heap_merkle_tree::{Digest, MerkleTree, verify_with_seed};
use log::{error, info};
use serde::Serialize;

use crate::cli::BenchConfig;

/// Knuth's multiplicative hash constant (2^32 / golden ratio).
const INDEX_MULTIPLIER: u32 = 2_654_435_761;

/// JSON report printed on stdout after a run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BenchReport {
    pub mode: &'static str,
    pub leaves: usize,
    pub proofs: u32,
    pub iters: u32,
    pub total_proofs: u64,
    pub checksum: u64,
    pub root: String,
    pub build_ms: u64,
    pub prove_verify_ms: u64,
}

/// Leaf proved by proof `proof` of iteration `iter`.
///
/// Spreads consecutive proofs across the tree; `leaf_count` must be a power
/// of two.
pub fn leaf_index_for(proof: u32, iter: u32, leaf_count: usize) -> u32 {
    proof.wrapping_mul(INDEX_MULTIPLIER).wrapping_add(iter) & (leaf_count - 1) as u32
}

/// Build the tree, then prove and verify `proofs * iters` leaves.
///
/// Every proof adds 1 to the checksum when it verifies, plus the first byte
/// of the root.
pub fn run(config: &BenchConfig) -> Result<BenchReport> {
    let started = Instant::now();
    let tree = if config.parallel {
        MerkleTree::par_build(&config.seed, config.leaves)
    } else {
        MerkleTree::build(&config.seed, config.leaves)
    }
    .context("building merkle tree")?;
    let build_ms = started.elapsed().as_millis() as u64;
    let root = *tree.root();
    info!("built {} leaves in {} ms", config.leaves, build_ms);

    let started = Instant::now();
    let mut path: Vec<Digest> = vec![[0u8; 32]; config.max_depth];
    let mut checksum = 0u64;
    for iter in 0..config.iters {
        if config.progress {
            info!("iter={}", iter + 1);
        }
        for proof in 0..config.proofs {
            let index = leaf_index_for(proof, iter, config.leaves);
            let depth = tree
                .write_proof(index, &mut path)
                .with_context(|| format!("proving leaf {}", index))?;
            let ok = verify_with_seed(&root, &config.seed, index, config.leaves, &path[..depth]);
            if !ok {
                error!("proof for leaf {} did not verify", index);
            }
            checksum += ok as u64;
            checksum += root[0] as u64;
        }
    }
    let prove_verify_ms = started.elapsed().as_millis() as u64;

    Ok(BenchReport {
        mode: "merkle",
        leaves: config.leaves,
        proofs: config.proofs,
        iters: config.iters,
        total_proofs: config.proofs as u64 * config.iters as u64,
        checksum,
        root: hex::encode(root),
        build_ms,
        prove_verify_ms,
    })
}
