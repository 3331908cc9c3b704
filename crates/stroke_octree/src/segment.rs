//! Conversion from merged line segments to stroke records.
//!
//! A stroke source typically ends with a set of merged Hough segments per
//! glyph. Each segment becomes one record:
//!
//! ```text
//! dx, dy      = x2 - x1, y2 - y1
//! θ           = 90                       if dx == 0
//!             = trunc(180·atan(dy/dx)/π) otherwise      (-90..=90)
//! orientation = trunc(SIZE · (θ + 90) / 180)            (0..=SIZE)
//! length      = trunc(√(dx² + dy²))
//! mid         = trunc(x1 + dx/2), trunc(y1 + dy/2)
//! weight      = trunc(budget / segment_count)
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::octree::Window;
use crate::types::StrokeRecord;

/// Merged line segment in pixel space, `(x1, y1) → (x2, y2)`.
///
/// Serialized as a `[x1, y1, x2, y2]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct LineSegment {
  /// Start x.
  pub x1: f64,
  /// Start y.
  pub y1: f64,
  /// End x.
  pub x2: f64,
  /// End y.
  pub y2: f64,
}

impl LineSegment {
  /// Segment from `(x1, y1)` to `(x2, y2)`.
  pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
    Self { x1, y1, x2, y2 }
  }

  /// Check if every endpoint coordinate is finite.
  #[inline]
  pub fn is_finite(&self) -> bool {
    self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
  }

  /// Orientation in whole degrees, truncated toward zero (-90..=90).
  pub fn degrees(&self) -> i32 {
    let dx = self.x2 - self.x1;
    let dy = self.y2 - self.y1;
    if dx == 0.0 {
      90
    } else {
      (180.0 * (dy / dx).atan() / PI) as i32
    }
  }

  /// Convert to a record with the given weight and label.
  ///
  /// `size` is the coordinate-space width the orientation is normalized to.
  pub fn to_record(&self, weight: u32, label: char, size: u32) -> StrokeRecord {
    let dx = self.x2 - self.x1;
    let dy = self.y2 - self.y1;
    let orientation = (size as f64 * (self.degrees() + 90) as f64 / 180.0) as i32;
    StrokeRecord {
      mid_x: (self.x1 + dx / 2.0) as i32,
      mid_y: (self.y1 + dy / 2.0) as i32,
      orientation,
      length: (dx * dx + dy * dy).sqrt() as u32,
      weight,
      label,
    }
  }
}

impl From<[f64; 4]> for LineSegment {
  fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
    Self::new(x1, y1, x2, y2)
  }
}

impl From<LineSegment> for [f64; 4] {
  fn from(s: LineSegment) -> Self {
    [s.x1, s.y1, s.x2, s.y2]
  }
}

/// Convert all merged segments of one glyph into records.
///
/// The stroke budget is shared evenly between segments. A glyph with no
/// segments fails with [`SourceError::NoStrokes`]. Non-finite coordinates,
/// or a midpoint outside `[0, size]`, fail with [`SourceError::Degenerate`].
pub fn glyph_records(
  label: char,
  segments: &[LineSegment],
  budget: u32,
  size: u32,
) -> Result<Vec<StrokeRecord>, SourceError> {
  if segments.is_empty() {
    return Err(SourceError::NoStrokes(label));
  }
  if segments.iter().any(|s| !s.is_finite()) {
    return Err(SourceError::Degenerate(label));
  }
  let weight = budget / segments.len() as u32;
  let window = Window::root(size);
  let records: Vec<StrokeRecord> = segments
    .iter()
    .map(|s| s.to_record(weight, label, size))
    .collect();
  if records.iter().any(|r| !window.contains(r.key())) {
    return Err(SourceError::Degenerate(label));
  }
  Ok(records)
}

#[cfg(test)]
#[path = "segment_test.rs"]
mod segment_test;
