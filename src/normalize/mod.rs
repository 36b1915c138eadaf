//! Tree normalizer and the flat index it builds.
//!
//! One walk over the distribution tree rescales relative siblings to `1fr`,
//! promotes undersized pixel panes to their minimum, and records an entry per
//! item so later operations never have to search the tree for sizing data.

mod core;

pub use core::{
    DEFAULT_FIXED_SIZES_SUM_VAR, FlatIndex, FlatIndexEntry, SizingContext, normalize, normalized,
};
