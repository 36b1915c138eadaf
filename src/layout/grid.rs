//! Grid template emitter.
//!
//! Produces the space-separated track list a rendering layer assigns to
//! `grid-template-rows` / `grid-template-columns` for one sibling list:
//! every item contributes its computed size, and every item that is not the
//! last and whose drag bar is visible is followed by a track for that bar.
//!
//! # Example
//! ```
//! use split_layout::layout::{grid_template, Direction, DistributionTree, DragBar, Leaf};
//! use split_layout::normalize::{normalize, SizingContext};
//! use split_layout::size::SizeSpec;
//!
//! let mut tree = DistributionTree::new(
//!     Direction::Columns,
//!     vec![
//!         Leaf::new("nav", SizeSpec::px(240.0)).with_drag_bar(DragBar::sized(4.0)).into(),
//!         Leaf::new("main", SizeSpec::fr(1.0)).into(),
//!     ],
//! );
//! let index = normalize(&mut tree, SizingContext::DEFAULT)?;
//! let template = grid_template(&tree.items, &index, tree.items.len() - 1, SizingContext::DEFAULT)?;
//! assert_eq!(template, "240px 4px calc(100% - 1 * var(--fixed-sizes-sum))");
//! # Ok::<(), split_layout::LayoutError>(())
//! ```

use crate::error::{LayoutError, Result};
use crate::layout::DistributionNode;
use crate::normalize::{FlatIndex, SizingContext};
use crate::size::format_number;

/// Emit the grid tracks for `items`, treating `last_index` as the final pane.
///
/// Fails with [`LayoutError::NotFound`] if an item is missing from `index`,
/// which means the index is stale.
pub fn grid_template(
    items: &[DistributionNode],
    index: &FlatIndex,
    last_index: usize,
    sizing: SizingContext<'_>,
) -> Result<String> {
    let mut tracks = Vec::with_capacity(items.len() * 2);

    for (position, item) in items.iter().enumerate() {
        let actual_size = index
            .actual_size(item.id())
            .ok_or_else(|| LayoutError::NotFound(item.id().to_string()))?;
        tracks.push(actual_size.to_string());

        if position == last_index || item.drag_bar_hidden() {
            continue;
        }
        let bar = item.drag_bar_size(sizing.default_drag_bar_size);
        tracks.push(format!("{}px", format_number(bar)));
    }

    Ok(tracks.join(" "))
}

/// Split a template into tracks, keeping `calc(...)` expressions whole.
pub fn split_tracks(template: &str) -> Vec<&str> {
    let mut tracks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (offset, ch) in template.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 => {
                if offset > start {
                    tracks.push(&template[start..offset]);
                }
                start = offset + 1;
            }
            _ => {}
        }
    }
    if start < template.len() {
        tracks.push(&template[start..]);
    }
    tracks
}
