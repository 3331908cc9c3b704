//! Parameter-space constants shared by the stroke index.
//!
//! All three axes of the index (horizontal position, vertical position and
//! normalized orientation) share one coordinate width, `SIZE`.
//!
//! # Parameter Space
//!
//! ```text
//!            θ (orientation, 0..=SIZE)
//!            │
//!            │     ┌─────────┐
//!            │    /│        /│
//!            │   ┌─────────┐ │      root window:
//!            │   │ └───────│─┘        center = (SIZE/2, SIZE/2, SIZE/2)
//!            │   │/        │/         half   = SIZE/2
//!            │   └─────────┘
//!            └──────────────────── X (0..SIZE)
//!           /
//!          Y (0..SIZE)
//!
//! Octant index bits (binary: θYX):
//!   0 = (-,-,-)    4 = (-,-,+)
//!   1 = (+,-,-)    5 = (+,-,+)
//!   2 = (-,+,-)    6 = (-,+,+)
//!   3 = (+,+,-)    7 = (+,+,+)
//! ```
//!
//! Orientation is normalized from `[-90°, 90°]` onto `[0, SIZE]`, so a
//! vertical stroke lands exactly on `SIZE`. The root window is closed on
//! both ends and therefore still contains it.

/// Default coordinate width shared by all three axes.
pub const DEFAULT_SIZE: u32 = 512;

/// Default number of records a leaf holds before it subdivides.
pub const DEFAULT_CAPACITY: usize = 8;

/// Default stroke budget shared out between the segments of one glyph.
pub const DEFAULT_STROKE_BUDGET: u32 = 50;

/// Number of children of an internal node.
pub const OCTANT_COUNT: usize = 8;

/// Octant bit for the horizontal position axis.
pub const X_BIT: u8 = 1 << 0;

/// Octant bit for the vertical position axis.
pub const Y_BIT: u8 = 1 << 1;

/// Octant bit for the orientation axis.
pub const THETA_BIT: u8 = 1 << 2;

/// Smallest half-extent a window can have and still be split.
///
/// Children of a window with half-extent 1 would be degenerate (half-extent
/// 0), so such windows are the depth floor of the tree.
pub const MIN_SPLIT_HALF_EXTENT: i32 = 2;

/// Maximum number of levels for a tree over `size`.
///
/// `log2(size / 2) + 1`: the root half-extent halves per level down to 1.
#[inline]
pub const fn max_levels(size: u32) -> u32 {
  (size / 2).trailing_zeros() + 1
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
