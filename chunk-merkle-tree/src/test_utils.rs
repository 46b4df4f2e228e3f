//! Shared helpers for unit tests.

use crate::{Digest, MerkleTree, leaf_digest, node_digest};

/// Install a test logger once; later calls are no-ops.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `count` distinct chunks: each is the big-endian `u32` of its index.
pub(crate) fn make_chunks(count: usize) -> Vec<Vec<u8>> {
    (0..count as u32).map(|i| i.to_be_bytes().to_vec()).collect()
}

/// Tree over [`make_chunks`]`(count)`.
pub(crate) fn make_tree(count: usize) -> MerkleTree {
    MerkleTree::build(make_chunks(count)).expect("power-of-two chunk count should build")
}

/// Root computed level by level, independently of the queue-based builder.
pub(crate) fn reference_root(chunks: &[Vec<u8>]) -> Digest {
    let mut level: Vec<Digest> = chunks.iter().map(|c| leaf_digest(c)).collect();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| node_digest(&pair[0], &pair[1]))
            .collect();
    }
    level[0]
}
