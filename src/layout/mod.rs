//! Layout module orchestrator.
//!
//! Downstream code imports the distribution tree types from here while the
//! implementation details live in the private `core` module. The `grid`
//! module turns a normalized sibling list into a grid-track string.

mod core;
pub mod grid;

pub use core::{DistributionNode, DistributionTree, Direction, DragBar, Group, ItemId, Leaf, ParentRef};
pub use grid::{grid_template, split_tracks};
