//! IndexBuilder - owned build context for one index.
//!
//! Replaces a process-wide root: each builder owns its tree, so independent
//! builds (per font, per test) never interfere.
//!
//! # Build Flow
//!
//! ```text
//! charset ──► StrokeSource::strokes(ch)  (sequential, or rayon in parallel)
//!                    │
//!                    ▼  results in charset order
//!             IndexBuilder::insert  (single writer)
//!                    │
//!                    ▼
//!             StrokeOctree + BuildStats
//! ```
//!
//! Per-character source errors are logged and counted; they never abort
//! the build. Parallel extraction funnels results back in charset order, so
//! parallel and sequential builds produce identical trees.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::error::{IndexError, SourceError};
use crate::octree::{IndexConfig, StrokeOctree};
use crate::source::StrokeSource;
use crate::types::StrokeRecord;

/// Counters from one build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
  /// Characters asked of the source.
  pub characters_processed: usize,
  /// Characters that contributed no records because the source failed.
  pub characters_skipped: usize,
  /// Records inserted into the tree.
  pub records_inserted: usize,
  /// Wall time spent extracting and inserting, in microseconds.
  pub build_time_us: u64,
}

impl BuildStats {
  /// Characters the source answered successfully.
  #[inline]
  pub fn characters_indexed(&self) -> usize {
    self.characters_processed - self.characters_skipped
  }
}

/// Owned build context: one tree plus its build counters.
pub struct IndexBuilder {
  tree: StrokeOctree,
  stats: BuildStats,
}

impl IndexBuilder {
  /// Start a build with an empty tree.
  pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
    Ok(Self {
      tree: StrokeOctree::new(config)?,
      stats: BuildStats::default(),
    })
  }

  /// Tree built so far.
  #[inline]
  pub fn tree(&self) -> &StrokeOctree {
    &self.tree
  }

  /// Counters so far.
  #[inline]
  pub fn stats(&self) -> &BuildStats {
    &self.stats
  }

  /// Insert a single record.
  pub fn insert(&mut self, record: StrokeRecord) -> Result<(), IndexError> {
    self.tree.insert(record)?;
    self.stats.records_inserted += 1;
    Ok(())
  }

  /// Insert one character's extraction result, swallowing source errors.
  fn accept(
    &mut self,
    label: char,
    result: Result<Vec<StrokeRecord>, SourceError>,
  ) -> Result<(), IndexError> {
    self.stats.characters_processed += 1;
    match result {
      Ok(records) => {
        // Reject the whole character before touching the tree.
        let root = self.tree.root_window();
        if let Some(stray) = records.iter().find(|r| !root.contains(r.key())) {
          return Err(IndexError::out_of_window(stray, root));
        }
        tracing::trace!(?label, records = records.len(), "indexing character");
        for record in records {
          self.insert(record)?;
        }
      }
      Err(err) => {
        tracing::debug!(?label, %err, "skipping character");
        self.stats.characters_skipped += 1;
      }
    }
    Ok(())
  }

  /// Extract and insert every character of `charset`, one at a time.
  #[tracing::instrument(skip_all, name = "builder::extend_from")]
  pub fn extend_from<S, I>(&mut self, source: &S, charset: I) -> Result<(), IndexError>
  where
    S: StrokeSource + ?Sized,
    I: IntoIterator<Item = char>,
  {
    let start = Instant::now();
    for label in charset {
      let result = source.strokes(label);
      self.accept(label, result)?;
    }
    self.stats.build_time_us += start.elapsed().as_micros() as u64;
    Ok(())
  }

  /// Extract characters in parallel with rayon, then insert sequentially.
  ///
  /// Results are collected in charset order before any insert, so the
  /// resulting tree equals the one from [`IndexBuilder::extend_from`].
  #[tracing::instrument(skip_all, name = "builder::par_extend_from")]
  pub fn par_extend_from<S>(&mut self, source: &S, charset: &[char]) -> Result<(), IndexError>
  where
    S: StrokeSource + ?Sized,
  {
    let start = Instant::now();
    let extracted: Vec<(char, Result<Vec<StrokeRecord>, SourceError>)> = charset
      .par_iter()
      .map(|&label| (label, source.strokes(label)))
      .collect();

    for (label, result) in extracted {
      self.accept(label, result)?;
    }
    self.stats.build_time_us += start.elapsed().as_micros() as u64;
    Ok(())
  }

  /// Finish the build, handing over the tree and its counters.
  pub fn finish(self) -> (StrokeOctree, BuildStats) {
    tracing::info!(
      records = self.stats.records_inserted,
      characters = self.stats.characters_processed,
      skipped = self.stats.characters_skipped,
      nodes = self.tree.node_count(),
      "index build finished"
    );
    (self.tree, self.stats)
  }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
