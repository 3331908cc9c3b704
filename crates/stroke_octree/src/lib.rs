//! stroke_octree - spatial index for glyph stroke segments
//!
//! Stroke segments extracted from rendered glyphs are indexed in an octree
//! over a 3D parameter space: horizontal position, vertical position and
//! normalized orientation. A consumer can then fetch the strokes near a
//! given position and angle without scanning the whole glyph set.
//!
//! # Features
//!
//! - **Lazy octree**: leaves split into 8 octants only when they overflow
//! - **Deterministic routing**: identical inputs build identical trees
//! - **Pre-order entry stream**: depth-annotated, reloadable without
//!   re-routing records
//! - **Parallel extraction**: per-character stroke extraction on rayon,
//!   inserts funnelled through one writer
//!
//! # Example
//!
//! ```ignore
//! use stroke_octree::{IndexBuilder, IndexConfig, SegmentTable, StrokeOctree};
//!
//! let table = SegmentTable::from_json_reader(file, 512)?;
//! let charset: Vec<char> = table.labels().collect();
//!
//! let mut builder = IndexBuilder::new(IndexConfig::default())?;
//! builder.par_extend_from(&table, &charset)?;
//! let (tree, stats) = builder.finish();
//!
//! tree.write_json(&mut out, false)?;
//! let reloaded = StrokeOctree::read_json(input)?;
//! assert_eq!(reloaded, tree);
//! ```

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::{DEFAULT_CAPACITY, DEFAULT_SIZE, DEFAULT_STROKE_BUDGET};
pub use error::{IndexError, SourceError};
pub use types::StrokeRecord;

// Octree index, serialization walk and loader
pub mod octree;
pub use octree::{
  EntryKind, IndexConfig, Node, NodeId, NodeKind, StrokeOctree, TreeEntry, TreeStats, Window,
};

// Persisted JSON document
pub mod persist;
pub use persist::{SerializedIndex, FORMAT_VERSION};

// Segment → record conversion
pub mod segment;
pub use segment::{glyph_records, LineSegment};

// Stroke sources and the build context
pub mod builder;
pub mod source;
pub use builder::{BuildStats, IndexBuilder};
pub use source::{SegmentTable, StrokeSource};

#[cfg(test)]
pub(crate) mod test_utils;
