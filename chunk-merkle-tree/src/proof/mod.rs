//! Inclusion proofs.
//!
//! An `InclusionProof` is the list of sibling digests on the path from a leaf
//! to the root, immediate sibling first. Each entry records which side of the
//! parent the sibling sits on, which fixes the concatenation order when the
//! verifier recomputes the parent digest.

use std::fmt;

use bincode::{Decode, Encode};
#[cfg(feature = "full")]
use log::debug;

use crate::{
    MerkleTreeError,
    hash::{Digest, digest_to_hex},
};
#[cfg(feature = "full")]
use crate::{MerkleTree, hash::leaf_digest};


/// Maximum number of entries a decoded proof may carry.
pub const MAX_PROOF_ENTRIES: usize = 64;

/// Upper bound on the encoded size of a proof with `MAX_PROOF_ENTRIES`
/// entries, including length prefixes.
const MAX_ENCODED_PROOF_BYTES: usize = 4096;

/// Which child of its parent a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub enum Side {
    /// Left child: its digest goes first when hashing the parent.
    Left,
    /// Right child: its digest goes second when hashing the parent.
    Right,
}

/// One sibling on the authentication path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct ProofEntry {
    /// Side of the parent the sibling sits on.
    pub side: Side,
    /// The sibling's digest.
    pub digest: Digest,
}

/// Ordered sibling digests proving that a chunk is a leaf of a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct InclusionProof {
    entries: Vec<ProofEntry>,
}

impl InclusionProof {
    /// Wrap precomputed entries, ordered leaf-side first.
    pub fn new(entries: Vec<ProofEntry>) -> Self {
        InclusionProof { entries }
    }

    /// The entries, immediate sibling first.
    pub fn entries(&self) -> &[ProofEntry] {
        &self.entries
    }

    /// Consume the proof and return its entries.
    pub fn into_entries(self) -> Vec<ProofEntry> {
        self.entries
    }

    /// Number of entries (the depth of the proved leaf).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the proof has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generate a proof that `chunk` is a leaf of `tree`.
    ///
    /// Fails with [`MerkleTreeError::ChunkNotFound`] when no leaf carries the
    /// chunk's digest, and with [`MerkleTreeError::NotALeaf`] when the digest
    /// only matches an internal node. For duplicated chunks the proof is for
    /// the first occurrence.
    #[cfg(feature = "full")]
    pub fn generate(tree: &MerkleTree, chunk: &[u8]) -> Result<Self, MerkleTreeError> {
        let digest = leaf_digest(chunk);

        let Some(leaf_index) = tree.leaf_index_of(&digest) else {
            // Not a leaf digest; the full search tells an internal collision
            // apart from an absent chunk.
            let hex = digest_to_hex(&digest);
            return match tree.find_leaf(&digest) {
                Some(_) => {
                    debug!("chunk digest {} matches an internal node", hex);
                    Err(MerkleTreeError::NotALeaf(hex))
                }
                None => {
                    debug!("could not find a leaf for chunk digest {}", hex);
                    Err(MerkleTreeError::ChunkNotFound(hex))
                }
            };
        };

        let path = tree.path_to_leaf(leaf_index);
        let mut entries = Vec::with_capacity(path.len().saturating_sub(1));
        for step in path.windows(2) {
            let (parent, child) = (tree.get(step[0]), step[1]);
            let Some((left, right)) = parent.children() else {
                return Err(MerkleTreeError::InvalidProof(format!(
                    "path to leaf {} passes through a leaf",
                    leaf_index
                )));
            };
            let sibling = tree.get(if left == child { right } else { left });
            let side = sibling.side().ok_or_else(|| {
                MerkleTreeError::InvalidProof(format!(
                    "sibling {} has no side tag",
                    digest_to_hex(sibling.digest())
                ))
            })?;
            entries.push(ProofEntry {
                side,
                digest: *sibling.digest(),
            });
        }
        // Collected root-first; the verifier replays leaf-first.
        entries.reverse();

        Ok(InclusionProof { entries })
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleTreeError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects trailing bytes and proofs longer than [`MAX_PROOF_ENTRIES`].
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleTreeError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ MAX_ENCODED_PROOF_BYTES }>();
        let (proof, read): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleTreeError::InvalidProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(MerkleTreeError::InvalidProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        if proof.entries.len() > MAX_PROOF_ENTRIES {
            return Err(MerkleTreeError::InvalidProof(format!(
                "proof has {} entries (max {})",
                proof.entries.len(),
                MAX_PROOF_ENTRIES
            )));
        }
        Ok(proof)
    }
}

impl fmt::Display for InclusionProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let tag = match entry.side {
                Side::Left => 'L',
                Side::Right => 'R',
            };
            write!(f, "{}:{}", tag, digest_to_hex(&entry.digest))?;
        }
        f.write_str("]")
    }
}

#[cfg(feature = "full")]
impl MerkleTree {
    /// Generate an inclusion proof for `chunk`, reporting why it failed.
    pub fn prove(&self, chunk: &[u8]) -> Result<InclusionProof, MerkleTreeError> {
        InclusionProof::generate(self, chunk)
    }

    /// Generate an inclusion proof for `chunk`, or an empty proof if the
    /// chunk is not a leaf of this tree.
    ///
    /// An empty proof never verifies. Use [`contains`](Self::contains) or
    /// [`prove`](Self::prove) to learn why a proof is missing.
    pub fn proof(&self, chunk: &[u8]) -> InclusionProof {
        self.prove(chunk).unwrap_or_default()
    }
}
