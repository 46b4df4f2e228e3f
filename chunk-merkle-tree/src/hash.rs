//! Digest function shared by the tree builder and the verifier.
//!
//! Leaves hash as `blake3(chunk)` and internal nodes as
//! `blake3(left || right)`. There is no domain tag separating the two, so an
//! internal node's digest is also the leaf digest of the 64-byte
//! concatenation of its children. A root-only verifier can be handed such a
//! concatenation as a "chunk" together with a shortened proof and will accept
//! it. [`MerkleTree::verify`](crate::MerkleTree::verify) rejects this by
//! checking the proof length against the tree depth; callers verifying
//! against a bare root must bound chunk sizes or know the depth themselves.

/// Width in bytes of every digest.
pub const DIGEST_LEN: usize = blake3::OUT_LEN;

/// A fixed-width Blake3 digest.
pub type Digest = [u8; DIGEST_LEN];

/// Digest of a leaf: `blake3(data)`.
pub fn leaf_digest(data: &[u8]) -> Digest {
    *blake3::hash(data).as_bytes()
}

/// Digest of an internal node: `blake3(left || right)`.
///
/// Argument order is significant.
pub fn node_digest(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// Lowercase hex form of a digest. Display only.
pub fn digest_to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}
