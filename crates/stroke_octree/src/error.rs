//! Error types for index construction, loading and stroke extraction.

use thiserror::Error;

use crate::octree::Window;
use crate::types::StrokeRecord;

/// Errors raised by the stroke index.
///
/// Inserting never fails for capacity reasons (overflow subdivides); the
/// variants here cover precondition violations and malformed persisted data.
#[derive(Debug, Error)]
pub enum IndexError {
  /// A record's key lies outside the root window.
  #[error("record ({x}, {y}, {theta}) lies outside the root window {root:?}")]
  OutOfWindow {
    x: i32,
    y: i32,
    theta: i32,
    root: Window,
  },

  /// Index configuration cannot describe a valid tree.
  #[error("invalid index config: {0}")]
  InvalidConfig(String),

  /// Serialized entry stream does not describe a tree.
  #[error("malformed entry stream at entry {index}: {reason}")]
  MalformedStream { index: usize, reason: String },

  /// Recorded window disagrees with the window derived from its parent.
  #[error("entry {index} records window {recorded:?}, expected {expected:?}")]
  WindowMismatch {
    index: usize,
    recorded: Window,
    expected: Window,
  },

  /// Persisted document has a format version this crate cannot read.
  #[error("unsupported index format version {0}")]
  UnsupportedVersion(u32),

  #[error("index json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("index io: {0}")]
  Io(#[from] std::io::Error),
}

impl IndexError {
  pub(crate) fn out_of_window(record: &StrokeRecord, root: Window) -> Self {
    Self::OutOfWindow {
      x: record.mid_x,
      y: record.mid_y,
      theta: record.orientation,
      root,
    }
  }

  pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
    Self::MalformedStream {
      index,
      reason: reason.into(),
    }
  }
}

/// Per-character extraction failures reported by a stroke source.
///
/// These never abort a build: the character contributes no records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
  /// The source has nothing for this character.
  #[error("no glyph for {0:?}")]
  NoGlyph(char),

  /// The glyph rendered, but no line segments were detected.
  #[error("no strokes detected for {0:?}")]
  NoStrokes(char),

  /// Detected geometry could not be turned into records.
  #[error("degenerate stroke geometry for {0:?}")]
  Degenerate(char),
}
