//! Shape statistics for a built octree.

use serde::{Deserialize, Serialize};

use super::StrokeOctree;

/// Shape summary of a tree, gathered in one pre-order walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
  /// Number of leaf nodes.
  pub leaf_count: usize,
  /// Number of internal nodes.
  pub internal_count: usize,
  /// Deepest level reached (root = 0).
  pub max_depth: u32,
  /// Records stored across all leaves.
  pub record_count: usize,
  /// Largest leaf occupancy.
  pub max_leaf_len: usize,
  /// Leaves holding no records.
  pub empty_leaf_count: usize,
}

impl TreeStats {
  /// Total number of nodes.
  #[inline]
  pub fn node_count(&self) -> usize {
    self.leaf_count + self.internal_count
  }

  /// Mean records per non-empty leaf.
  pub fn mean_occupancy(&self) -> f64 {
    let occupied = self.leaf_count - self.empty_leaf_count;
    if occupied == 0 {
      0.0
    } else {
      self.record_count as f64 / occupied as f64
    }
  }
}

impl StrokeOctree {
  /// Gather shape statistics.
  pub fn stats(&self) -> TreeStats {
    let mut stats = TreeStats::default();
    for (depth, node) in self.pre_order() {
      stats.max_depth = stats.max_depth.max(depth);
      if node.is_leaf() {
        let n = node.records().len();
        stats.leaf_count += 1;
        stats.record_count += n;
        stats.max_leaf_len = stats.max_leaf_len.max(n);
        if n == 0 {
          stats.empty_leaf_count += 1;
        }
      } else {
        stats.internal_count += 1;
      }
    }
    stats
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::octree::IndexConfig;
  use crate::types::StrokeRecord;

  #[test]
  fn test_empty_tree_stats() {
    let tree = StrokeOctree::new(IndexConfig::default()).unwrap();
    let stats = tree.stats();
    assert_eq!(stats.leaf_count, 1);
    assert_eq!(stats.internal_count, 0);
    assert_eq!(stats.max_depth, 0);
    assert_eq!(stats.record_count, 0);
    assert_eq!(stats.empty_leaf_count, 1);
    assert_eq!(stats.mean_occupancy(), 0.0);
  }

  #[test]
  fn test_one_split_stats() {
    let mut tree = StrokeOctree::new(IndexConfig::default().with_capacity(1)).unwrap();
    tree.insert(StrokeRecord::new(10, 10, 10, 5, 1, 'a')).unwrap();
    tree.insert(StrokeRecord::new(500, 500, 500, 5, 1, 'b')).unwrap();

    let stats = tree.stats();
    assert_eq!(stats.internal_count, 1);
    assert_eq!(stats.leaf_count, 8);
    assert_eq!(stats.node_count(), tree.node_count());
    assert_eq!(stats.max_depth, 1);
    assert_eq!(stats.record_count, 2);
    assert_eq!(stats.max_leaf_len, 1);
    assert_eq!(stats.empty_leaf_count, 6);
    assert_eq!(stats.mean_occupancy(), 1.0);
  }
}
