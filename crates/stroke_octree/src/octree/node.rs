//! Arena nodes of the stroke octree.
//!
//! Nodes are addressed by [`NodeId`] into the owning tree's arena instead of
//! owning their children directly.

use super::Window;
use crate::types::StrokeRecord;

/// Index of a node in the tree arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
  /// The root node of every tree.
  pub const ROOT: NodeId = NodeId(0);

  /// Get the raw arena index.
  #[inline]
  pub fn index(&self) -> usize {
    self.0 as usize
  }
}

/// Contents of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
  /// Records in insertion order.
  Leaf(Vec<StrokeRecord>),
  /// Children indexed by octant (0-7).
  Internal([NodeId; 8]),
}

/// Octree node: a routing window plus either records or 8 children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
  /// Key range covered by this node.
  pub window: Window,
  /// Leaf records or child ids.
  pub kind: NodeKind,
}

impl Node {
  /// Create an empty leaf.
  pub fn leaf(window: Window) -> Self {
    Self {
      window,
      kind: NodeKind::Leaf(Vec::new()),
    }
  }

  /// Check if this node is a leaf.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self.kind, NodeKind::Leaf(_))
  }

  /// Records held directly by this node (empty for internal nodes).
  #[inline]
  pub fn records(&self) -> &[StrokeRecord] {
    match &self.kind {
      NodeKind::Leaf(records) => records,
      NodeKind::Internal(_) => &[],
    }
  }

  /// Child ids, if internal.
  #[inline]
  pub fn children(&self) -> Option<&[NodeId; 8]> {
    match &self.kind {
      NodeKind::Leaf(_) => None,
      NodeKind::Internal(children) => Some(children),
    }
  }

  /// Get a child by octant, if internal.
  #[inline]
  pub fn child(&self, octant: u8) -> Option<NodeId> {
    self.children().map(|c| c[octant as usize])
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
