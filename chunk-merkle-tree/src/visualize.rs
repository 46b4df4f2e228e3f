//! Debug dump of a tree, level by level.

use std::{
    collections::VecDeque,
    io::{self, Write},
};

use crate::{MerkleTree, NodeId, NodeKind, proof::Side};

const HEX_LEN: usize = 8;

/// Shortened hex: first and last `HEX_LEN` characters.
fn short_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    if encoded.len() > 2 * HEX_LEN + 2 {
        format!(
            "{}..{}",
            &encoded[..HEX_LEN],
            &encoded[encoded.len() - HEX_LEN..]
        )
    } else {
        encoded
    }
}

impl MerkleTree {
    /// Node ids in breadth-first order, root first, left before right.
    pub fn bfs(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.node_count());
        let mut queue = VecDeque::from([self.root_id()]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            if let NodeKind::Internal { left, right } = self.get(id).kind() {
                queue.push_back(*left);
                queue.push_back(*right);
            }
        }
        order
    }

    /// Write one line per level, root first, e.g.
    ///
    /// ```text
    /// depth 1: C[1f2e3d4c..a9b8c7d6]
    /// depth 0: L[0a1b2c3d..4e5f6071](1 bytes) R[...](1 bytes)
    /// ```
    pub fn visualize<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut current_depth = None;
        for id in self.bfs() {
            let node = self.get(id);
            if current_depth != Some(node.depth()) {
                if current_depth.is_some() {
                    out.write_all(b"\n")?;
                }
                write!(out, "depth {}:", node.depth())?;
                current_depth = Some(node.depth());
            }
            let tag = match node.side() {
                Some(Side::Left) => 'L',
                Some(Side::Right) => 'R',
                None => 'C',
            };
            write!(out, " {}[{}]", tag, short_hex(node.digest()))?;
            if let Some(payload) = node.payload() {
                write!(out, "({} bytes)", payload.len())?;
            }
        }
        out.write_all(b"\n")?;
        out.flush()
    }
}
