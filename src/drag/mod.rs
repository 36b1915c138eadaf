//! Drag resize engine: converts a pointer delta across one drag bar into size
//! changes on the two panes adjacent to it.

mod core;

pub use core::{DragInput, DragResult, apply_drag, rendered_px, resolve_delta};
