//! Render-surface registry orchestrator.

mod core;

pub use core::{GroupSurface, SurfaceRegistry};
