//! Proof verification.
//!
//! Pure functions, no tree access required: the proof is replayed from the
//! candidate chunk up to a root digest and compared with the trusted root.

use log::trace;
#[cfg(feature = "full")]
use log::debug;

use crate::{
    hash::{Digest, digest_to_hex, leaf_digest, node_digest},
    proof::{InclusionProof, Side},
};
#[cfg(feature = "full")]
use crate::MerkleTree;

impl InclusionProof {
    /// Recompute the root digest implied by this proof for `chunk`.
    ///
    /// Starting from `leaf_digest(chunk)`, each entry is combined with the
    /// running digest on the side it records.
    pub fn compute_root(&self, chunk: &[u8]) -> Digest {
        self.entries()
            .iter()
            .fold(leaf_digest(chunk), |acc, entry| {
                let parent = match entry.side {
                    Side::Left => node_digest(&entry.digest, &acc),
                    Side::Right => node_digest(&acc, &entry.digest),
                };
                trace!("intermediate node digest: {}", digest_to_hex(&parent));
                parent
            })
    }

    /// Check that `chunk` with this proof hashes up to `expected_root`.
    ///
    /// An empty proof is always rejected: every tree has at least two leaves,
    /// so no leaf is its own root.
    pub fn verify(&self, chunk: &[u8], expected_root: &Digest) -> bool {
        if self.is_empty() {
            return false;
        }
        &self.compute_root(chunk) == expected_root
    }
}

#[cfg(feature = "full")]
impl MerkleTree {
    /// Check `proof` for `chunk` against this tree's root.
    ///
    /// Besides replaying the proof, the proof length must equal the tree
    /// depth, which rules out passing an internal node's children off as a
    /// chunk.
    pub fn verify(&self, proof: &InclusionProof, chunk: &[u8]) -> bool {
        if proof.len() != self.depth() as usize {
            debug!(
                "proof length {} does not match tree depth {}",
                proof.len(),
                self.depth()
            );
            return false;
        }
        proof.verify(chunk, self.root_digest())
    }
}
