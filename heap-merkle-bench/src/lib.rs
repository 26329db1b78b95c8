//! Benchmark driver for `heap-merkle-tree`: builds a seeded tree, then proves
//! and verifies a deterministic stream of leaves and reports a checksum.

pub mod cli;
pub mod driver;
