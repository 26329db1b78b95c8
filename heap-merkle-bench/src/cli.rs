use anyhow::{Context, Result, ensure};
use clap::Parser;
use heap_merkle_tree::{Seed, validate_leaf_count};
use serde::Serialize;

/// Seed used when `--seed` is not given: bytes 0x00..=0x1f.
pub const DEFAULT_SEED_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

#[derive(Parser, Debug, Serialize, Clone)]
#[command(about = "Build a seeded Merkle tree, then prove and verify pseudo-random leaves")]
pub struct BenchCli {
    /// Number of leaves; must be a power of two
    #[arg(long, default_value_t = 1024)]
    pub leaves: usize,

    /// Proofs generated and verified per iteration
    #[arg(long, default_value_t = 16)]
    pub proofs: u32,

    /// Number of iterations over the proof set
    #[arg(long, default_value_t = 1)]
    pub iters: u32,

    /// Tree seed as 64 hex characters
    #[arg(long, default_value = DEFAULT_SEED_HEX)]
    pub seed: String,

    /// Largest proof the driver accepts, in sibling digests
    #[arg(long, default_value_t = 20)]
    pub max_depth: usize,

    /// Hash tree levels in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Log a line at the start of every iteration
    #[arg(long)]
    pub progress: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    pub output: Option<String>,
}

/// Validated benchmark configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub leaves: usize,
    pub proofs: u32,
    pub iters: u32,
    pub seed: Seed,
    pub max_depth: usize,
    pub parallel: bool,
    pub progress: bool,
}

impl BenchCli {
    /// Check the arguments and turn them into a [`BenchConfig`].
    pub fn config(&self) -> Result<BenchConfig> {
        validate_leaf_count(self.leaves).context("invalid --leaves")?;
        let depth = self.leaves.trailing_zeros() as usize;
        ensure!(
            depth <= self.max_depth,
            "--leaves {} needs proofs of depth {}, above --max-depth {}",
            self.leaves,
            depth,
            self.max_depth
        );
        let seed = Seed::from_hex(&self.seed).context("invalid --seed")?;
        Ok(BenchConfig {
            leaves: self.leaves,
            proofs: self.proofs,
            iters: self.iters,
            seed,
            max_depth: self.max_depth,
            parallel: self.parallel,
            progress: self.progress,
        })
    }
}
