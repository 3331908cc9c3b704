//! StrokeOctree - arena-backed octree over (x, y, θ).
//!
//! # Subdivision
//!
//! Leaves split lazily: a leaf converts to an internal node the first time an
//! insert would push it past `capacity`. Its records, plus the new one, are
//! then routed into the 8 children by [`Window::octant_of`] against the
//! leaf's own window. A node never reverts to a leaf.
//!
//! Leaves whose window has half-extent 1 are the depth floor; they accept
//! records past `capacity` because their children would be degenerate.

use glam::IVec3;
use smallvec::{smallvec, SmallVec};

use super::{IndexConfig, Node, NodeId, NodeKind, Window};
use crate::error::IndexError;
use crate::types::StrokeRecord;

/// Octree of stroke records keyed by (mid_x, mid_y, orientation).
#[derive(Clone, Debug)]
pub struct StrokeOctree {
  config: IndexConfig,
  /// Arena; `nodes[0]` is the root.
  nodes: Vec<Node>,
  /// Total records stored.
  len: usize,
  /// Leaf-to-internal conversions performed.
  subdivisions: usize,
}

impl StrokeOctree {
  /// Create a tree holding a single empty root leaf.
  pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
    config.validate()?;
    Ok(Self {
      config,
      nodes: vec![Node::leaf(config.root_window())],
      len: 0,
      subdivisions: 0,
    })
  }

  /// Assemble a tree from an already-linked arena. Used by the loader.
  pub(crate) fn from_arena(config: IndexConfig, nodes: Vec<Node>, len: usize) -> Self {
    let subdivisions = nodes.iter().filter(|n| !n.is_leaf()).count();
    Self {
      config,
      nodes,
      len,
      subdivisions,
    }
  }

  /// Configuration this tree was built with.
  #[inline]
  pub fn config(&self) -> &IndexConfig {
    &self.config
  }

  /// Root window.
  #[inline]
  pub fn root_window(&self) -> Window {
    self.nodes[NodeId::ROOT.index()].window
  }

  /// Get the root node.
  #[inline]
  pub fn root(&self) -> &Node {
    &self.nodes[NodeId::ROOT.index()]
  }

  /// Get a node by id.
  ///
  /// # Panics
  /// Panics if `id` does not belong to this tree.
  #[inline]
  pub fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.index()]
  }

  /// Number of stored records.
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Check if no records are stored.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Number of nodes (leaves and internal).
  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Number of leaf-to-internal conversions.
  #[inline]
  pub fn subdivisions(&self) -> usize {
    self.subdivisions
  }

  /// Insert a record.
  ///
  /// Fails only when the record lies outside the root window; the tree is
  /// left untouched in that case.
  pub fn insert(&mut self, record: StrokeRecord) -> Result<(), IndexError> {
    let root = self.root_window();
    if !root.contains(record.key()) {
      return Err(IndexError::out_of_window(&record, root));
    }
    self.insert_at(NodeId::ROOT, record);
    self.len += 1;
    Ok(())
  }

  /// Route `record` down from `id` and store it in a leaf.
  fn insert_at(&mut self, mut id: NodeId, record: StrokeRecord) {
    let key = record.key();
    let capacity = self.config.capacity;
    loop {
      let node = &mut self.nodes[id.index()];
      let window = node.window;
      match &mut node.kind {
        NodeKind::Internal(children) => {
          id = children[window.octant_of(key) as usize];
        }
        NodeKind::Leaf(records) => {
          if records.len() < capacity || !window.can_subdivide() {
            records.push(record);
            return;
          }
          // Full leaf: split, then route from the same node again.
          self.subdivide(id);
        }
      }
    }
  }

  /// Convert leaf `id` into an internal node and redistribute its records.
  fn subdivide(&mut self, id: NodeId) {
    let node = &mut self.nodes[id.index()];
    let window = node.window;
    let NodeKind::Leaf(records) = &mut node.kind else {
      return;
    };
    let held = std::mem::take(records);

    let first = self.nodes.len() as u32;
    let children: [NodeId; 8] = std::array::from_fn(|i| NodeId(first + i as u32));
    self
      .nodes
      .extend((0..8u8).map(|octant| Node::leaf(window.child_window(octant))));
    self.nodes[id.index()].kind = NodeKind::Internal(children);
    self.subdivisions += 1;

    tracing::trace!(
      node = id.index(),
      half_extent = window.half_extent,
      records = held.len(),
      "subdivide"
    );

    for record in held {
      let child = children[window.octant_of(record.key()) as usize];
      self.insert_at(child, record);
    }
  }

  /// Records of the leaf a key routes to.
  ///
  /// Returns `None` if the key is outside the root window.
  pub fn leaf_containing(&self, key: IVec3) -> Option<&[StrokeRecord]> {
    if !self.root_window().contains(key) {
      return None;
    }
    let mut node = self.root();
    while let Some(child) = node.child(node.window.octant_of(key)) {
      node = self.node(child);
    }
    Some(node.records())
  }

  /// All records whose key lies inside `window`, in pre-order.
  ///
  /// Subtrees whose window does not touch `window` are skipped.
  pub fn query(&self, window: &Window) -> Vec<&StrokeRecord> {
    let mut found = Vec::new();
    let mut stack: SmallVec<[NodeId; 64]> = smallvec![NodeId::ROOT];
    while let Some(id) = stack.pop() {
      let node = self.node(id);
      if !node.window.overlaps(window) {
        continue;
      }
      match &node.kind {
        NodeKind::Leaf(records) => {
          found.extend(records.iter().filter(|r| window.contains(r.key())));
        }
        NodeKind::Internal(children) => stack.extend(children.iter().rev().copied()),
      }
    }
    found
  }

  /// Records near a key: everything within `radius` on every axis.
  pub fn near(&self, key: IVec3, radius: i32) -> Vec<&StrokeRecord> {
    self.query(&Window::new(key, radius.max(0)))
  }

  /// Iterate over all records, leaf by leaf in pre-order.
  pub fn records(&self) -> impl Iterator<Item = &StrokeRecord> {
    self.pre_order().flat_map(|(_, node)| node.records().iter())
  }
}

/// Trees are equal when their pre-order walks match: same shape, windows and
/// per-leaf record order. Arena layout is not compared.
impl PartialEq for StrokeOctree {
  fn eq(&self, other: &Self) -> bool {
    if self.config != other.config || self.len != other.len {
      return false;
    }
    let mut a = self.pre_order();
    let mut b = other.pre_order();
    loop {
      match (a.next(), b.next()) {
        (None, None) => return true,
        (Some((da, na)), Some((db, nb))) => {
          if da != db
            || na.window != nb.window
            || na.is_leaf() != nb.is_leaf()
            || na.records() != nb.records()
          {
            return false;
          }
        }
        _ => return false,
      }
    }
  }
}

impl Eq for StrokeOctree {}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
