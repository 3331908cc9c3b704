//! Test utilities shared by the unit tests.
//!
//! Provides seeded record generators and whole-tree invariant checks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::octree::{NodeId, NodeKind, StrokeOctree};
use crate::types::StrokeRecord;

// =============================================================================
// Record Fixtures
// =============================================================================

/// Seeded records spread uniformly over `[0, size)` on every axis.
pub fn random_records(seed: u64, count: usize, size: u32) -> Vec<StrokeRecord> {
  let mut rng = StdRng::seed_from_u64(seed);
  let labels = ['A', 'B', 'C', 'x', 'y', '▚', '┃'];
  (0..count)
    .map(|i| {
      StrokeRecord::new(
        rng.random_range(0..size as i32),
        rng.random_range(0..size as i32),
        rng.random_range(0..size as i32),
        rng.random_range(20..400),
        rng.random_range(1..50),
        labels[i % labels.len()],
      )
    })
    .collect()
}

/// Records clustered around one point, to force deep subdivision.
pub fn clustered_records(seed: u64, count: usize, center: i32, spread: i32) -> Vec<StrokeRecord> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| {
      StrokeRecord::new(
        center + rng.random_range(-spread..=spread),
        center + rng.random_range(-spread..=spread),
        center + rng.random_range(-spread..=spread),
        30,
        5,
        'k',
      )
    })
    .collect()
}

/// Record at a key with fixed payload.
pub fn record_at(x: i32, y: i32, theta: i32) -> StrokeRecord {
  StrokeRecord::new(x, y, theta, 25, 10, 'z')
}

/// Build a tree by inserting `records` in order.
pub fn build(config: crate::octree::IndexConfig, records: &[StrokeRecord]) -> StrokeOctree {
  let mut tree = StrokeOctree::new(config).unwrap();
  for record in records {
    tree.insert(*record).unwrap();
  }
  tree
}

// =============================================================================
// Invariant Checks
// =============================================================================

/// Every record under a node lies inside that node's window, and every
/// non-floor leaf respects capacity.
pub fn assert_invariants(tree: &StrokeOctree) {
  let capacity = tree.config().capacity;
  let mut stack = vec![(NodeId::ROOT, Vec::<NodeId>::new())];
  let mut seen = 0usize;

  while let Some((id, ancestors)) = stack.pop() {
    let node = tree.node(id);
    match &node.kind {
      NodeKind::Leaf(records) => {
        if node.window.can_subdivide() {
          assert!(
            records.len() <= capacity,
            "Leaf {:?} holds {} records, capacity {}",
            node.window,
            records.len(),
            capacity
          );
        }
        for record in records {
          assert!(node.window.contains(record.key()));
          for ancestor in &ancestors {
            let window = tree.node(*ancestor).window;
            assert!(
              window.contains(record.key()),
              "Record {:?} escapes ancestor {:?}",
              record.key(),
              window
            );
          }
        }
        seen += records.len();
      }
      NodeKind::Internal(children) => {
        let mut path = ancestors.clone();
        path.push(id);
        for child in children {
          stack.push((*child, path.clone()));
        }
      }
    }
  }

  assert_eq!(seen, tree.len(), "Stored record count mismatch");
}

/// Sort key for comparing record multisets.
pub fn sorted(mut records: Vec<StrokeRecord>) -> Vec<StrokeRecord> {
  records.sort_by_key(|r| (r.mid_x, r.mid_y, r.orientation, r.length, r.weight, r.label));
  records
}
