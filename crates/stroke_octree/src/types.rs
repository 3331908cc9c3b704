//! Core data types for stroke indexing.

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// A single detected stroke segment - immutable value type.
///
/// Position and orientation are already normalized into the index's
/// parameter space (see [`crate::constants`]). Once inserted, a record is
/// owned by exactly one leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeRecord {
  /// Segment midpoint, horizontal pixel coordinate.
  pub mid_x: i32,
  /// Segment midpoint, vertical pixel coordinate.
  pub mid_y: i32,
  /// Orientation normalized onto `[0, SIZE]`.
  pub orientation: i32,
  /// Segment length in pixels.
  pub length: u32,
  /// Share of the glyph's stroke budget assigned to this segment.
  pub weight: u32,
  /// Character the segment was extracted from.
  pub label: char,
}

impl StrokeRecord {
  /// Create a new record.
  pub fn new(mid_x: i32, mid_y: i32, orientation: i32, length: u32, weight: u32, label: char) -> Self {
    Self {
      mid_x,
      mid_y,
      orientation,
      length,
      weight,
      label,
    }
  }

  /// Routing key: (x, y, θ) in parameter space.
  #[inline]
  pub fn key(&self) -> IVec3 {
    IVec3::new(self.mid_x, self.mid_y, self.orientation)
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
