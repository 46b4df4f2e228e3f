//! Build / prove / verify benchmark

use std::hint::black_box;

use chunk_merkle_tree::MerkleTree;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn make_chunks(count: usize) -> Vec<Vec<u8>> {
    (0..count as u64)
        .map(|i| {
            let mut chunk = vec![0u8; 1024];
            chunk[..8].copy_from_slice(&i.to_be_bytes());
            chunk
        })
        .collect()
}

pub fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &count in &[16usize, 256, 4096] {
        let chunks = make_chunks(count);
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| MerkleTree::build(black_box(chunks.clone())))
        });
    }
    group.finish();
}

pub fn prove_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("prove_and_verify");
    for &count in &[16usize, 256, 4096] {
        let chunks = make_chunks(count);
        let tree = MerkleTree::build(chunks.clone()).expect("power-of-two count");
        let chunk = &chunks[count / 3];

        group.bench_function(BenchmarkId::new("prove", count), |b| {
            b.iter(|| tree.prove(black_box(chunk)))
        });

        let proof = tree.proof(chunk);
        group.bench_function(BenchmarkId::new("verify", count), |b| {
            b.iter(|| proof.verify(black_box(chunk), tree.root_digest()))
        });
    }
    group.finish();
}

criterion_group!(benches, build, prove_and_verify);
criterion_main!(benches);
