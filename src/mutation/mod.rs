//! Structural mutation engine: insert a sibling pane, remove a pane and hand
//! its space to a neighbor, and collapse groups left with a single child.
//!
//! These functions edit the tree only. Callers rebuild the flat index
//! afterwards (the session does this by re-normalizing).

mod core;

pub use core::{
    IdGenerator, InsertOutcome, InsertRequest, MixedTransferPolicy, Placement, RemoveOutcome,
    RenamedItem, SequentialIds, SpaceTransfer, add_space_to_item, apply_transfer, insert_index,
    insert_sibling, plan_transfer, remove_item,
};
