use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::{
    MerkleTreeError,
    hash::{Digest, digest_to_hex, leaf_digest, node_digest},
    proof::Side,
};

/// Index of a node in the tree's arena.
///
/// Leaves occupy ids `0..leaf_count` in chunk order, so a leaf's id equals its
/// original position. Internal nodes follow in creation order and the root is
/// always the last node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node holds: a chunk, or exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf committing to one chunk.
    Leaf {
        /// The original chunk bytes.
        payload: Vec<u8>,
        /// Position of the chunk in the input sequence.
        leaf_index: usize,
    },
    /// An internal node owning two subtrees.
    Internal {
        /// Left child.
        left: NodeId,
        /// Right child.
        right: NodeId,
    },
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    digest: Digest,
    kind: NodeKind,
    depth: u32,
    side: Option<Side>,
}

impl Node {
    /// The node's digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Leaf or internal contents.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// 0 for leaves, one more than the children for internal nodes.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Which child of its parent this node is; `None` for the root.
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Chunk bytes for leaves, `None` for internal nodes.
    pub fn payload(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::Leaf { payload, .. } => Some(payload),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Original chunk position for leaves.
    pub fn leaf_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Leaf { leaf_index, .. } => Some(leaf_index),
            NodeKind::Internal { .. } => None,
        }
    }

    /// `(left, right)` for internal nodes.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { left, right } => Some((left, right)),
        }
    }
}

/// An immutable binary Merkle tree over `2^k` chunks (`k >= 1`).
///
/// Nodes are stored in an arena and reference their children by [`NodeId`].
/// A map from leaf digest to leaf index is built once during construction so
/// proof requests do not need to scan the tree.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    nodes: Vec<Node>,
    root: NodeId,
    leaf_count: usize,
    leaf_lookup: HashMap<Digest, usize>,
}

/// Chunk counts must be a power of two and at least 2.
pub(crate) fn validate_chunk_count(count: usize) -> Result<(), MerkleTreeError> {
    if count < 2 || !count.is_power_of_two() {
        return Err(MerkleTreeError::InvalidChunkCount { count });
    }
    Ok(())
}

impl MerkleTree {
    /// Build a tree over `chunks`, preserving their order.
    ///
    /// Fails with [`MerkleTreeError::InvalidChunkCount`] when fewer than two
    /// chunks are given or the count is not a power of two.
    ///
    /// Nodes are combined through a FIFO queue: the two nodes at the front
    /// become the left and right children of a new node pushed to the back,
    /// until only the root is left.
    pub fn build<I, C>(chunks: I) -> Result<Self, MerkleTreeError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        let chunks: Vec<Vec<u8>> = chunks.into_iter().map(Into::into).collect();
        let leaf_count = chunks.len();
        validate_chunk_count(leaf_count)?;

        let mut nodes = Vec::with_capacity(2 * leaf_count - 1);
        let mut leaf_lookup = HashMap::with_capacity(leaf_count);

        for (leaf_index, payload) in chunks.into_iter().enumerate() {
            let digest = leaf_digest(&payload);
            // Duplicate chunks resolve to their first occurrence.
            leaf_lookup.entry(digest).or_insert(leaf_index);
            nodes.push(Node {
                digest,
                kind: NodeKind::Leaf {
                    payload,
                    leaf_index,
                },
                depth: 0,
                side: None,
            });
        }

        let mut queue: VecDeque<NodeId> = (0..leaf_count).map(NodeId).collect();
        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.pop_front(), queue.pop_front()) else {
                break;
            };

            // Sides come from this pairing alone.
            nodes[left.0].side = Some(Side::Left);
            nodes[right.0].side = Some(Side::Right);

            let digest = node_digest(&nodes[left.0].digest, &nodes[right.0].digest);
            let depth = nodes[left.0].depth.max(nodes[right.0].depth) + 1;

            let id = NodeId(nodes.len());
            nodes.push(Node {
                digest,
                kind: NodeKind::Internal { left, right },
                depth,
                side: None,
            });
            queue.push_back(id);
        }

        let root = queue
            .pop_front()
            .ok_or(MerkleTreeError::InvalidChunkCount { count: leaf_count })?;

        let tree = MerkleTree {
            nodes,
            root,
            leaf_count,
            leaf_lookup,
        };
        debug!(
            "built merkle tree: {} chunks, depth {}, root {}",
            leaf_count,
            tree.depth(),
            digest_to_hex(tree.root_digest())
        );
        Ok(tree)
    }

    /// Id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root digest, the single value a verifier must trust.
    pub fn root_digest(&self) -> &Digest {
        &self.get(self.root).digest
    }

    /// Depth of the root: `log2(leaf_count)`.
    pub fn depth(&self) -> u32 {
        self.get(self.root).depth
    }

    /// Number of chunks the tree was built from.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Total number of nodes: `2 * leaf_count - 1`.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The leaf holding the chunk at `leaf_index`.
    pub fn leaf(&self, leaf_index: usize) -> Option<&Node> {
        if leaf_index >= self.leaf_count {
            return None;
        }
        self.nodes.get(leaf_index)
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Index of the first leaf whose digest is `digest`.
    pub fn leaf_index_of(&self, digest: &Digest) -> Option<usize> {
        self.leaf_lookup.get(digest).copied()
    }

    /// Whether some leaf holds `chunk`.
    ///
    /// Use this to tell a missing chunk apart from an empty
    /// [`proof`](Self::proof).
    pub fn contains(&self, chunk: &[u8]) -> bool {
        self.leaf_lookup.contains_key(&leaf_digest(chunk))
    }

    /// Pre-order search (node, left subtree, right subtree) for the first node
    /// whose digest equals `digest`.
    ///
    /// The match is not guaranteed to be a leaf: if an internal digest happens
    /// to equal the searched digest the internal node is returned, so callers
    /// must check [`Node::is_leaf`].
    pub fn find_leaf(&self, digest: &Digest) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.get(id);
            if &node.digest == digest {
                return Some(id);
            }
            if let NodeKind::Internal { left, right } = node.kind {
                stack.push(right);
                stack.push(left);
            }
        }
        None
    }

    /// Root-first path to the first node (in pre-order) carrying `target`'s
    /// digest, ending with that node.
    ///
    /// Returns an empty path if `target` is not a node of this tree.
    pub fn path_to_node(&self, target: NodeId) -> Vec<NodeId> {
        let Some(target) = self.node(target) else {
            return Vec::new();
        };
        let mut path = Vec::with_capacity(self.depth() as usize + 1);
        if self.descend(self.root, &target.digest, &mut path) {
            path
        } else {
            Vec::new()
        }
    }

    fn descend(&self, current: NodeId, digest: &Digest, path: &mut Vec<NodeId>) -> bool {
        path.push(current);
        let node = self.get(current);
        if &node.digest == digest {
            return true;
        }
        if let NodeKind::Internal { left, right } = node.kind {
            if self.descend(left, digest, path) || self.descend(right, digest, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Root-first path to the leaf at `leaf_index`, ending with the leaf.
    ///
    /// Walks down using the bits of the index, most significant first: a 0
    /// bit goes left and a 1 bit goes right. Returns an empty path when the
    /// index is out of range.
    pub fn path_to_leaf(&self, leaf_index: usize) -> Vec<NodeId> {
        if leaf_index >= self.leaf_count {
            return Vec::new();
        }
        let mut path = Vec::with_capacity(self.depth() as usize + 1);
        let mut current = self.root;
        loop {
            path.push(current);
            let node = self.get(current);
            match node.kind {
                NodeKind::Leaf { .. } => break,
                NodeKind::Internal { left, right } => {
                    current = if (leaf_index >> (node.depth - 1)) & 1 == 0 {
                        left
                    } else {
                        right
                    };
                }
            }
        }
        path
    }
}
