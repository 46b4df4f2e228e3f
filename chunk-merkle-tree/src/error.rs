use thiserror::Error;

/// Errors from Merkle tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleTreeError {
    /// The chunk count is below 2 or not a power of two.
    #[error("chunk count must be a power of two and at least 2, got {count}")]
    InvalidChunkCount {
        /// Number of chunks supplied.
        count: usize,
    },
    /// No leaf digest matches the chunk (hex digest attached).
    #[error("no leaf found for chunk digest {0}")]
    ChunkNotFound(String),
    /// The chunk digest matched an internal node rather than a leaf.
    #[error("node with digest {0} is not a leaf")]
    NotALeaf(String),
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}
