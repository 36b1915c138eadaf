//! Layout-splitter distribution engine.
//!
//! A distribution tree nests rows and columns of panes sized in pixels
//! (`"240px"`) or relative weights (`"1fr"`). The engine normalizes the tree,
//! emits CSS grid-track strings for every sibling list, resizes panes across
//! drag bars, and inserts or removes panes while keeping the tree valid. It
//! never touches a DOM: rendering layers hand it pixel deltas and read back
//! templates and sizes.
//!
//! Modules follow the orchestrator pattern: each `mod.rs` re-exports the
//! public surface while the implementation lives in a private `core` module.

pub mod drag;
pub mod error;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod mutation;
pub mod normalize;
pub mod registry;
pub mod session;
pub mod size;

pub use drag::{DragInput, DragResult};
pub use error::{LayoutError, Result};
pub use layout::{
    Direction, DistributionNode, DistributionTree, DragBar, Group, ItemId, Leaf, ParentRef,
    grid_template, split_tracks,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{EngineMetrics, MetricSnapshot};
pub use mutation::{
    IdGenerator, InsertOutcome, InsertRequest, MixedTransferPolicy, Placement, RemoveOutcome,
    RenamedItem, SequentialIds, SpaceTransfer,
};
pub use normalize::{FlatIndex, FlatIndexEntry, SizingContext, normalize, normalized};
pub use registry::{GroupSurface, SurfaceRegistry};
pub use session::{DEFAULT_LOG_TARGET, Distribution, DistributionConfig, DragOutcome};
pub use size::{SizeKind, SizeSpec};
