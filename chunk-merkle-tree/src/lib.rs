//! Binary Merkle tree over an ordered, power-of-two sequence of chunks.
//!
//! The tree is built bottom-up in a single pass and is immutable afterwards.
//! Every leaf commits to one chunk and every internal node to its two
//! children:
//!
//! - leaf: `blake3(chunk)`
//! - internal: `blake3(left || right)`
//!
//! An [`InclusionProof`] lists the sibling digests from a leaf up to the root,
//! each tagged with the [`Side`] it sits on. A verifier only needs the chunk,
//! the proof and the trusted root digest.
//!
//! # Features
//!
//! - `full` (default): tree construction, lookup and proof generation.
//! - `verify`: proof types, proof codec and root-only verification.

#![warn(missing_docs)]

mod error;
pub mod hash;
#[cfg(feature = "verify")]
pub(crate) mod proof;
#[cfg(feature = "full")]
pub(crate) mod tree;
#[cfg(feature = "verify")]
mod verify;
#[cfg(feature = "full")]
mod visualize;

#[cfg(all(test, feature = "full"))]
pub(crate) mod test_utils;

pub use error::MerkleTreeError;
pub use hash::{DIGEST_LEN, Digest, digest_to_hex, leaf_digest, node_digest};
#[cfg(feature = "verify")]
pub use proof::{InclusionProof, MAX_PROOF_ENTRIES, ProofEntry, Side};
#[cfg(feature = "full")]
pub use tree::{MerkleTree, Node, NodeId, NodeKind};
