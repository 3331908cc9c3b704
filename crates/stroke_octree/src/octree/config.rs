//! IndexConfig - coordinate-space width and leaf capacity.

use serde::{Deserialize, Serialize};

use super::Window;
use crate::constants::{max_levels, DEFAULT_CAPACITY, DEFAULT_SIZE};
use crate::error::IndexError;

/// Configuration for a stroke octree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
  /// Coordinate-space width shared by all three axes. Power of two, >= 2.
  pub size: u32,

  /// Records a leaf holds before it subdivides. At least 1.
  pub capacity: usize,
}

impl IndexConfig {
  /// Create a config with the given size and capacity.
  pub fn new(size: u32, capacity: usize) -> Self {
    Self { size, capacity }
  }

  /// Builder-style capacity override.
  pub fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity;
    self
  }

  /// Builder-style size override.
  pub fn with_size(mut self, size: u32) -> Self {
    self.size = size;
    self
  }

  /// Reject configs that cannot describe a tree.
  ///
  /// The size must halve cleanly down to a half-extent of 1, and the size
  /// must fit the `i32` coordinate type.
  pub fn validate(&self) -> Result<(), IndexError> {
    if self.size < 2 || !self.size.is_power_of_two() {
      return Err(IndexError::InvalidConfig(format!(
        "size must be a power of two >= 2, got {}",
        self.size
      )));
    }
    if self.size > i32::MAX as u32 {
      return Err(IndexError::InvalidConfig(format!(
        "size {} does not fit the coordinate type",
        self.size
      )));
    }
    if self.capacity == 0 {
      return Err(IndexError::InvalidConfig(
        "capacity must be at least 1".to_string(),
      ));
    }
    Ok(())
  }

  /// Root window covering `[0, size]` on every axis.
  #[inline]
  pub fn root_window(&self) -> Window {
    Window::root(self.size)
  }

  /// Maximum number of levels a tree with this config can reach.
  #[inline]
  pub fn max_levels(&self) -> u32 {
    max_levels(self.size)
  }
}

impl Default for IndexConfig {
  fn default() -> Self {
    Self {
      size: DEFAULT_SIZE,
      capacity: DEFAULT_CAPACITY,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
