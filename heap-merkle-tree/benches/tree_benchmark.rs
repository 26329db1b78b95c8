#[macro_use]
extern crate criterion;

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use heap_merkle_tree::{MerkleTree, Seed, leaf_hash, verify};

const SEED: Seed = Seed::new([0x42; 32]);

/// Same golden-ratio index walk the benchmark driver uses.
fn leaf_index(i: u32, leaf_count: usize) -> u32 {
    i.wrapping_mul(2_654_435_761) & (leaf_count - 1) as u32
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("tree build");
        for leaves in [1usize << 10, 1 << 14, 1 << 18] {
            group.bench_with_input(BenchmarkId::new("sequential", leaves), &leaves, |b, &n| {
                b.iter(|| MerkleTree::build(&SEED, n).expect("build"));
            });
            group.bench_with_input(BenchmarkId::new("parallel", leaves), &leaves, |b, &n| {
                b.iter(|| MerkleTree::par_build(&SEED, n).expect("build"));
            });
        }
    }

    c.bench_function("tree build proof", |b| {
        let tree = MerkleTree::build(&SEED, 1 << 18).expect("build");
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            tree.build_proof(leaf_index(i, tree.leaf_count()), 20)
                .expect("proof")
        });
    });

    c.bench_function("tree verify", |b| {
        let leaf_count = 1usize << 18;
        let tree = MerkleTree::build(&SEED, leaf_count).expect("build");
        let root = *tree.root();
        let proofs: Vec<_> = (0..1024u32)
            .map(|i| {
                let index = leaf_index(i, leaf_count);
                let proof = tree.build_proof(index, 20).expect("proof");
                (index, leaf_hash(&SEED, index), proof)
            })
            .collect();
        let mut i = 0usize;
        b.iter(|| {
            let (index, leaf, proof) = &proofs[i % proofs.len()];
            i += 1;
            assert!(verify(&root, *index, leaf_count, leaf, black_box(proof)));
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench
);
criterion_main!(benches);
