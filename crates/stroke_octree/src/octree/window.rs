//! Partition window - axis-aligned cube in (x, y, θ) parameter space.
//!
//! A window is a routing key range only; it never holds pixel data.

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SPLIT_HALF_EXTENT, THETA_BIT, X_BIT, Y_BIT};

/// Axis-aligned cube defined by a center and a half-extent.
///
/// Containment is closed: a key `k` is inside when `|k - center| <= half_extent`
/// on every axis. Orientation is treated as a linear axis (no wraparound).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
  /// Center point (x, y, θ).
  pub center: IVec3,
  /// Half the edge length, shared by all three axes.
  pub half_extent: i32,
}

impl Window {
  /// Create a new window from center and half-extent.
  pub fn new(center: IVec3, half_extent: i32) -> Self {
    debug_assert!(half_extent >= 0, "half-extent must be non-negative");
    Self {
      center,
      half_extent,
    }
  }

  /// Window covering the full `[0, size]` coordinate space on every axis.
  pub fn root(size: u32) -> Self {
    let half = (size / 2) as i32;
    Self::new(IVec3::splat(half), half)
  }

  /// Minimum corner (inclusive).
  #[inline]
  pub fn min(&self) -> IVec3 {
    self.center - IVec3::splat(self.half_extent)
  }

  /// Maximum corner (inclusive).
  #[inline]
  pub fn max(&self) -> IVec3 {
    self.center + IVec3::splat(self.half_extent)
  }

  /// Octant index of a key relative to this window's center.
  ///
  /// - bit 0: x >= center.x
  /// - bit 1: y >= center.y
  /// - bit 2: θ >= center.θ
  ///
  /// Keys exactly on the center route to the "above" side.
  #[inline]
  pub fn octant_of(&self, key: IVec3) -> u8 {
    let mut octant = 0u8;
    if key.x >= self.center.x {
      octant |= X_BIT;
    }
    if key.y >= self.center.y {
      octant |= Y_BIT;
    }
    if key.z >= self.center.z {
      octant |= THETA_BIT;
    }
    octant
  }

  /// Window of child `octant` (0-7), using the same bit convention as
  /// [`Window::octant_of`].
  pub fn child_window(&self, octant: u8) -> Self {
    debug_assert!(octant < 8, "octant out of range: {}", octant);
    let half = self.half_extent / 2;
    let sign = |bit: u8| if octant & bit != 0 { half } else { -half };
    Self {
      center: self.center + IVec3::new(sign(X_BIT), sign(Y_BIT), sign(THETA_BIT)),
      half_extent: half,
    }
  }

  /// Whether this window is large enough to be split into 8 children.
  #[inline]
  pub fn can_subdivide(&self) -> bool {
    self.half_extent >= MIN_SPLIT_HALF_EXTENT
  }

  /// Check if this window contains a key (closed on both ends).
  ///
  /// Compares against the corners, so keys anywhere in `i32` are safe.
  #[inline]
  pub fn contains(&self, key: IVec3) -> bool {
    key.cmpge(self.min()).all() && key.cmple(self.max()).all()
  }

  /// Check if this window overlaps another, boundary contact included.
  #[inline]
  pub fn overlaps(&self, other: &Window) -> bool {
    let (a_min, a_max) = (self.min(), self.max());
    let (b_min, b_max) = (other.min(), other.max());
    a_min.cmple(b_max).all() && a_max.cmpge(b_min).all()
  }

  /// Check if `other` lies entirely inside this window.
  #[inline]
  pub fn encloses(&self, other: &Window) -> bool {
    self.min().cmple(other.min()).all() && self.max().cmpge(other.max()).all()
  }
}
