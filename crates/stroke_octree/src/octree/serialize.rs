//! Pre-order serialization and stack-based reconstruction.
//!
//! # Entry Stream
//!
//! ```text
//! depth 0  internal  [root]
//! depth 1  leaf      [octant 0]  records...
//! depth 1  internal  [octant 1]
//! depth 2  leaf      [octant 1/0]
//! ...      (8 entries at depth 2)
//! depth 1  leaf      [octant 2]
//! ...
//! ```
//!
//! A node's entry precedes its descendants; children appear in octant order
//! 0..7. The loader keeps a stack of open internal nodes: an entry at
//! `depth` closes every open node at `depth` or deeper and becomes the next
//! child of the node left on top. No routing is recomputed, so leaf record
//! order is exactly the recorded order.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::{IndexConfig, Node, NodeId, NodeKind, StrokeOctree, Window};
use crate::error::IndexError;
use crate::types::StrokeRecord;

/// Kind of a serialized node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
  /// Internal node; its 8 children follow.
  Internal,
  /// Leaf with records in insertion order.
  Leaf(Vec<StrokeRecord>),
}

/// One node of the flat, depth-annotated stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
  /// Nesting level; 0 for the root.
  pub depth: u32,
  /// Window of the node.
  pub window: Window,
  /// Internal marker or leaf records.
  pub kind: EntryKind,
}

impl TreeEntry {
  /// Check if this entry is a leaf.
  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self.kind, EntryKind::Leaf(_))
  }
}

/// Pre-order walk over a tree, yielding `(depth, node)`.
pub struct PreOrder<'a> {
  tree: &'a StrokeOctree,
  stack: SmallVec<[(u32, NodeId); 64]>,
}

impl<'a> Iterator for PreOrder<'a> {
  type Item = (u32, &'a Node);

  fn next(&mut self) -> Option<Self::Item> {
    let (depth, id) = self.stack.pop()?;
    let node = self.tree.node(id);
    if let NodeKind::Internal(children) = &node.kind {
      // Reverse so octant 0 is popped first.
      self
        .stack
        .extend(children.iter().rev().map(|&child| (depth + 1, child)));
    }
    Some((depth, node))
  }
}

impl StrokeOctree {
  /// Pre-order walk from the root, children in octant order.
  pub fn pre_order(&self) -> PreOrder<'_> {
    PreOrder {
      tree: self,
      stack: smallvec![(0, NodeId::ROOT)],
    }
  }

  /// Walk the tree once, calling `emit(depth, window, records)` per node.
  ///
  /// `records` is `Some` for leaves and `None` for internal nodes.
  pub fn serialize<F>(&self, mut emit: F)
  where
    F: FnMut(u32, &Window, Option<&[StrokeRecord]>),
  {
    for (depth, node) in self.pre_order() {
      match &node.kind {
        NodeKind::Leaf(records) => emit(depth, &node.window, Some(records)),
        NodeKind::Internal(_) => emit(depth, &node.window, None),
      }
    }
  }

  /// Collect the serialized entry stream.
  pub fn entries(&self) -> Vec<TreeEntry> {
    let mut entries = Vec::with_capacity(self.node_count());
    self.serialize(|depth, window, records| {
      entries.push(TreeEntry {
        depth,
        window: *window,
        kind: match records {
          Some(records) => EntryKind::Leaf(records.to_vec()),
          None => EntryKind::Internal,
        },
      });
    });
    entries
  }

  /// Rebuild a tree from a pre-order entry stream.
  ///
  /// Every entry's window must equal the window derived from its parent
  /// slot, and every leaf record must lie inside its leaf's window.
  #[tracing::instrument(skip_all, name = "octree::from_entries")]
  pub fn from_entries<I>(config: IndexConfig, entries: I) -> Result<Self, IndexError>
  where
    I: IntoIterator<Item = TreeEntry>,
  {
    config.validate()?;

    /// Internal node still waiting for children.
    struct Open {
      id: NodeId,
      depth: u32,
      filled: u8,
    }

    let mut nodes: Vec<Node> = Vec::new();
    let mut open: Vec<Open> = Vec::new();
    let mut len = 0usize;
    let mut count = 0usize;

    for (index, entry) in entries.into_iter().enumerate() {
      count = index + 1;

      let (expected, parent) = if index == 0 {
        if entry.depth != 0 {
          return Err(IndexError::malformed(
            index,
            format!("first entry at depth {}, expected 0", entry.depth),
          ));
        }
        (config.root_window(), None)
      } else {
        while let Some(top) = open.last() {
          if top.depth < entry.depth {
            break;
          }
          if top.filled != 8 {
            return Err(IndexError::malformed(
              index,
              format!("internal node closed with {} children", top.filled),
            ));
          }
          open.pop();
        }
        let Some(top) = open.last() else {
          return Err(IndexError::malformed(index, "entry after the root closed"));
        };
        if entry.depth != top.depth + 1 {
          return Err(IndexError::malformed(
            index,
            format!("depth jumps from {} to {}", top.depth, entry.depth),
          ));
        }
        if top.filled == 8 {
          return Err(IndexError::malformed(
            index,
            "internal node has more than 8 children",
          ));
        }
        let parent_window = nodes[top.id.index()].window;
        (parent_window.child_window(top.filled), Some((top.id, top.filled)))
      };

      if entry.window != expected {
        return Err(IndexError::WindowMismatch {
          index,
          recorded: entry.window,
          expected,
        });
      }

      let id = NodeId(nodes.len() as u32);
      if let Some((parent_id, slot)) = parent {
        if let NodeKind::Internal(children) = &mut nodes[parent_id.index()].kind {
          children[slot as usize] = id;
        }
        if let Some(top) = open.last_mut() {
          top.filled += 1;
        }
      }

      match entry.kind {
        EntryKind::Leaf(records) => {
          if let Some(stray) = records.iter().find(|r| !entry.window.contains(r.key())) {
            return Err(IndexError::malformed(
              index,
              format!("record {:?} outside its leaf window", stray.key()),
            ));
          }
          if entry.window.can_subdivide() && records.len() > config.capacity {
            return Err(IndexError::malformed(
              index,
              format!(
                "leaf holds {} records with capacity {}",
                records.len(),
                config.capacity
              ),
            ));
          }
          len += records.len();
          nodes.push(Node {
            window: entry.window,
            kind: NodeKind::Leaf(records),
          });
        }
        EntryKind::Internal => {
          if !entry.window.can_subdivide() {
            return Err(IndexError::malformed(
              index,
              format!(
                "internal node with half-extent {} below the depth floor",
                entry.window.half_extent
              ),
            ));
          }
          nodes.push(Node {
            window: entry.window,
            kind: NodeKind::Internal([id; 8]),
          });
          open.push(Open {
            id,
            depth: entry.depth,
            filled: 0,
          });
        }
      }
    }

    if nodes.is_empty() {
      return Err(IndexError::malformed(0, "empty entry stream"));
    }
    if let Some(top) = open.iter().find(|o| o.filled != 8) {
      return Err(IndexError::malformed(
        count,
        format!(
          "stream ended with internal node at depth {} holding {} children",
          top.depth, top.filled
        ),
      ));
    }

    tracing::debug!(nodes = nodes.len(), records = len, "rebuilt octree from entries");
    Ok(StrokeOctree::from_arena(config, nodes, len))
  }
}

#[cfg(test)]
#[path = "serialize_test.rs"]
mod serialize_test;
