//! Octree module for indexing strokes in (x, y, θ) parameter space.
//!
//! The tree is stored as an arena of [`Node`]s addressed by [`NodeId`]. Each
//! node carries its [`Window`]; leaves own records, internal nodes own exactly
//! eight children, one per octant.
//!
//! # Module Structure
//!
//! - [`window`]: `Window` - routing key range, octant math
//! - [`config`]: `IndexConfig` - coordinate width and leaf capacity
//! - [`node`]: `Node` / `NodeId` - arena entries
//! - [`tree`]: `StrokeOctree` - insertion, lazy subdivision, queries
//! - [`serialize`]: pre-order entry stream and stack-based loader
//! - [`stats`]: `TreeStats` - shape summary

pub mod config;
pub mod node;
pub mod serialize;
pub mod stats;
pub mod tree;
pub mod window;

// Re-exports
pub use config::IndexConfig;
pub use node::{Node, NodeId, NodeKind};
pub use serialize::{EntryKind, PreOrder, TreeEntry};
pub use stats::TreeStats;
pub use tree::StrokeOctree;
pub use window::Window;
