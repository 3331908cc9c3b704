//! On-disk form of a stroke index.
//!
//! The document stores the index config next to the pre-order entry stream,
//! so a consumer can rebuild the tree with [`StrokeOctree::from_entries`]
//! without re-deriving it from raw geometry.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::octree::{IndexConfig, StrokeOctree, TreeEntry};

/// Current document format version.
pub const FORMAT_VERSION: u32 = 1;

/// Persisted index: format version, config and entry stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedIndex {
  pub version: u32,
  pub config: IndexConfig,
  pub entries: Vec<TreeEntry>,
}

impl SerializedIndex {
  /// Write as JSON. `pretty` selects indented output.
  pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> Result<(), IndexError> {
    if pretty {
      serde_json::to_writer_pretty(writer, self)?;
    } else {
      serde_json::to_writer(writer, self)?;
    }
    Ok(())
  }

  /// Read from JSON, rejecting unknown format versions.
  pub fn read_json<R: Read>(reader: R) -> Result<Self, IndexError> {
    let document: Self = serde_json::from_reader(reader)?;
    if document.version != FORMAT_VERSION {
      return Err(IndexError::UnsupportedVersion(document.version));
    }
    Ok(document)
  }
}

impl StrokeOctree {
  /// Snapshot this tree as a persistable document.
  pub fn to_serialized(&self) -> SerializedIndex {
    SerializedIndex {
      version: FORMAT_VERSION,
      config: *self.config(),
      entries: self.entries(),
    }
  }

  /// Rebuild a tree from a persisted document.
  pub fn from_serialized(document: SerializedIndex) -> Result<Self, IndexError> {
    if document.version != FORMAT_VERSION {
      return Err(IndexError::UnsupportedVersion(document.version));
    }
    Self::from_entries(document.config, document.entries)
  }

  /// Serialize straight to a JSON writer.
  pub fn write_json<W: Write>(&self, writer: W, pretty: bool) -> Result<(), IndexError> {
    self.to_serialized().write_json(writer, pretty)
  }

  /// Load straight from a JSON reader.
  pub fn read_json<R: Read>(reader: R) -> Result<Self, IndexError> {
    Self::from_serialized(SerializedIndex::read_json(reader)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{build, random_records};

  #[test]
  fn test_json_roundtrip() {
    let tree = build(IndexConfig::default().with_capacity(3), &random_records(1, 200, 512));

    let mut buffer = Vec::new();
    tree.write_json(&mut buffer, false).unwrap();
    let loaded = StrokeOctree::read_json(buffer.as_slice()).unwrap();

    assert_eq!(loaded, tree);
    assert_eq!(loaded.config(), tree.config());
  }

  #[test]
  fn test_pretty_and_compact_agree() {
    let tree = build(IndexConfig::default(), &random_records(2, 50, 512));

    let mut compact = Vec::new();
    let mut pretty = Vec::new();
    tree.write_json(&mut compact, false).unwrap();
    tree.write_json(&mut pretty, true).unwrap();

    assert!(pretty.len() > compact.len());
    assert_eq!(
      SerializedIndex::read_json(compact.as_slice()).unwrap(),
      SerializedIndex::read_json(pretty.as_slice()).unwrap()
    );
  }

  #[test]
  fn test_document_carries_config() {
    let tree = build(IndexConfig::new(256, 2), &random_records(3, 30, 256));
    let document = tree.to_serialized();
    assert_eq!(document.version, FORMAT_VERSION);
    assert_eq!(document.config, IndexConfig::new(256, 2));
    assert_eq!(document.entries, tree.entries());
  }

  #[test]
  fn test_rejects_unknown_version() {
    let mut document = StrokeOctree::new(IndexConfig::default())
      .unwrap()
      .to_serialized();
    document.version = 99;

    let mut buffer = Vec::new();
    document.write_json(&mut buffer, false).unwrap();
    assert!(matches!(
      SerializedIndex::read_json(buffer.as_slice()),
      Err(IndexError::UnsupportedVersion(99))
    ));
    assert!(matches!(
      StrokeOctree::from_serialized(document),
      Err(IndexError::UnsupportedVersion(99))
    ));
  }

  #[test]
  fn test_rejects_truncated_json() {
    let tree = build(IndexConfig::default(), &random_records(4, 20, 512));
    let mut buffer = Vec::new();
    tree.write_json(&mut buffer, false).unwrap();
    buffer.truncate(buffer.len() / 2);

    assert!(matches!(
      StrokeOctree::read_json(buffer.as_slice()),
      Err(IndexError::Json(_))
    ));
  }
}
