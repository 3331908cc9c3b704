//! Stroke sources - producers of per-character stroke records.
//!
//! Rasterizing, skeletonizing and line-detecting glyphs happens outside this
//! crate. A [`StrokeSource`] is the seam where that work hands over records.

use std::collections::BTreeMap;
use std::io::Read;

use crate::constants::{DEFAULT_SIZE, DEFAULT_STROKE_BUDGET};
use crate::error::{IndexError, SourceError};
use crate::segment::{glyph_records, LineSegment};
use crate::types::StrokeRecord;

/// Per-character stroke extraction.
///
/// Implementations are queried once per character and may be called from
/// several threads at once. An `Err` means "this character contributes
/// nothing"; it never aborts a build.
pub trait StrokeSource: Send + Sync {
  /// Records for one character, already normalized into the index space.
  fn strokes(&self, label: char) -> Result<Vec<StrokeRecord>, SourceError>;
}

/// Boxed trait objects delegate to the inner source.
impl StrokeSource for Box<dyn StrokeSource> {
  fn strokes(&self, label: char) -> Result<Vec<StrokeRecord>, SourceError> {
    (**self).strokes(label)
  }
}

/// Blanket impl for references to any source.
impl<S: StrokeSource + ?Sized> StrokeSource for &S {
  fn strokes(&self, label: char) -> Result<Vec<StrokeRecord>, SourceError> {
    (**self).strokes(label)
  }
}

/// Stroke source backed by a table of merged segments per character.
///
/// The JSON form is an object keyed by character:
///
/// ```text
/// { "A": [[x1, y1, x2, y2], ...], "B": [...] }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentTable {
  glyphs: BTreeMap<char, Vec<LineSegment>>,
  /// Stroke budget shared between one glyph's segments.
  budget: u32,
  /// Coordinate width orientations are normalized to.
  size: u32,
}

impl SegmentTable {
  /// Create an empty table for a coordinate width.
  pub fn new(size: u32) -> Self {
    Self {
      glyphs: BTreeMap::new(),
      budget: DEFAULT_STROKE_BUDGET,
      size,
    }
  }

  /// Builder-style stroke budget override.
  pub fn with_budget(mut self, budget: u32) -> Self {
    self.budget = budget;
    self
  }

  /// Read a table from JSON.
  pub fn from_json_reader<R: Read>(reader: R, size: u32) -> Result<Self, IndexError> {
    let glyphs: BTreeMap<char, Vec<LineSegment>> = serde_json::from_reader(reader)?;
    Ok(Self {
      glyphs,
      ..Self::new(size)
    })
  }

  /// Add or replace one glyph's segments.
  pub fn insert_glyph(&mut self, label: char, segments: Vec<LineSegment>) {
    self.glyphs.insert(label, segments);
  }

  /// Characters present in the table, in code point order.
  pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
    self.glyphs.keys().copied()
  }

  /// Number of glyphs.
  pub fn len(&self) -> usize {
    self.glyphs.len()
  }

  /// Check if the table has no glyphs.
  pub fn is_empty(&self) -> bool {
    self.glyphs.is_empty()
  }
}

impl Default for SegmentTable {
  fn default() -> Self {
    Self::new(DEFAULT_SIZE)
  }
}

impl StrokeSource for SegmentTable {
  fn strokes(&self, label: char) -> Result<Vec<StrokeRecord>, SourceError> {
    let segments = self.glyphs.get(&label).ok_or(SourceError::NoGlyph(label))?;
    glyph_records(label, segments, self.budget, self.size)
  }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;
