use std::collections::HashMap;

use crate::error::{LayoutError, Result};
use crate::layout::{DistributionNode, DistributionTree, ItemId, ParentRef};
use crate::size::SizeSpec;

/// Custom property the relative size expressions read the fixed budget from.
pub const DEFAULT_FIXED_SIZES_SUM_VAR: &str = "--fixed-sizes-sum";

/// Weight sums this close to one are treated as already normalized.
const WEIGHT_TOLERANCE: f64 = 1e-12;

/// Knobs shared by every sizing computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingContext<'a> {
    pub fixed_sizes_sum_var: &'a str,
    pub default_drag_bar_size: f64,
}

impl SizingContext<'static> {
    pub const DEFAULT: SizingContext<'static> = SizingContext {
        fixed_sizes_sum_var: DEFAULT_FIXED_SIZES_SUM_VAR,
        default_drag_bar_size: 0.0,
    };
}

impl Default for SizingContext<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Derived per-item data; rebuilt by [`normalize`], never edited by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndexEntry {
    pub parent: ParentRef,
    /// CSS value for the item's grid track.
    pub actual_size: String,
    /// Fixed-size budget of the item's own sibling list (groups only).
    pub fixed_sizes_sum: Option<f64>,
}

impl FlatIndexEntry {
    pub fn is_group(&self) -> bool {
        self.fixed_sizes_sum.is_some()
    }
}

/// Item id to sizing data, plus the budget of the root sibling list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatIndex {
    entries: HashMap<ItemId, FlatIndexEntry>,
    root_fixed_sizes_sum: f64,
}

impl FlatIndex {
    pub fn get(&self, id: &str) -> Option<&FlatIndexEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn parent_of(&self, id: &str) -> Option<&ParentRef> {
        self.entries.get(id).map(|entry| &entry.parent)
    }

    pub fn actual_size(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|entry| entry.actual_size.as_str())
    }

    pub fn root_fixed_sizes_sum(&self) -> f64 {
        self.root_fixed_sizes_sum
    }

    /// Fixed-size budget of a sibling list; `None` for unknown or leaf ids.
    pub fn fixed_sizes_sum(&self, parent: &ParentRef) -> Option<f64> {
        match parent {
            ParentRef::Root => Some(self.root_fixed_sizes_sum),
            ParentRef::Group(id) => self.entries.get(id)?.fixed_sizes_sum,
        }
    }

    pub(crate) fn refresh_actual_size(&mut self, node: &DistributionNode, sizing: SizingContext<'_>) {
        if let Some(entry) = self.entries.get_mut(node.id()) {
            entry.actual_size = node.actual_size(sizing.fixed_sizes_sum_var);
        }
    }
}

/// Normalize `tree` in place and build its flat index.
///
/// Fails with [`LayoutError::EmptyGroup`] for a sibling list without items and
/// [`LayoutError::DuplicateId`] when two items share an id.
pub fn normalize(tree: &mut DistributionTree, sizing: SizingContext<'_>) -> Result<FlatIndex> {
    let mut index = FlatIndex::default();
    index.root_fixed_sizes_sum = normalize_items(&mut tree.items, &ParentRef::Root, &mut index, sizing)?;
    Ok(index)
}

/// Copy-on-write variant of [`normalize`]; `tree` is left untouched.
pub fn normalized(
    tree: &DistributionTree,
    sizing: SizingContext<'_>,
) -> Result<(DistributionTree, FlatIndex)> {
    let mut copy = tree.clone();
    let index = normalize(&mut copy, sizing)?;
    Ok((copy, index))
}

fn normalize_items(
    items: &mut [DistributionNode],
    parent: &ParentRef,
    index: &mut FlatIndex,
    sizing: SizingContext<'_>,
) -> Result<f64> {
    if items.is_empty() {
        return Err(LayoutError::EmptyGroup(parent.to_string()));
    }

    let last_index = items.len() - 1;
    let mut fixed_sizes_sum = 0.0;
    let mut weight_sum = 0.0;

    for (position, item) in items.iter().enumerate() {
        match item.size() {
            SizeSpec::Absolute(px) => fixed_sizes_sum += px,
            SizeSpec::Relative(fr) => weight_sum += fr,
        }
        fixed_sizes_sum += item.fixed_offset_size().unwrap_or(0.0);
        if position != last_index {
            fixed_sizes_sum += item.drag_bar_size(sizing.default_drag_bar_size);
        }
    }

    fixed_sizes_sum += promote_to_min_sizes(items);
    rescale_weights(items, weight_sum);

    for item in items.iter_mut() {
        let child_sum = match item {
            DistributionNode::Group(group) => {
                let own = ParentRef::Group(group.id.clone());
                Some(normalize_items(&mut group.items, &own, index, sizing)?)
            }
            DistributionNode::Leaf(_) => None,
        };

        let entry = FlatIndexEntry {
            parent: parent.clone(),
            actual_size: item.actual_size(sizing.fixed_sizes_sum_var),
            fixed_sizes_sum: child_sum,
        };
        if index.entries.insert(item.id().to_string(), entry).is_some() {
            return Err(LayoutError::DuplicateId(item.id().to_string()));
        }
    }

    Ok(fixed_sizes_sum)
}

/// Raise pixel panes below their pixel minimum; returns the pixels added.
fn promote_to_min_sizes(items: &mut [DistributionNode]) -> f64 {
    let mut added = 0.0;
    for item in items.iter_mut() {
        if let (SizeSpec::Absolute(px), Some(SizeSpec::Absolute(min))) = (item.size(), item.min_size()) {
            if px < min {
                item.set_size(SizeSpec::Absolute(min));
                added += min - px;
            }
        }
    }
    added
}

fn rescale_weights(items: &mut [DistributionNode], weight_sum: f64) {
    if weight_sum <= 0.0 || (weight_sum - 1.0).abs() <= WEIGHT_TOLERANCE {
        return;
    }
    for item in items.iter_mut() {
        if let SizeSpec::Relative(fr) = item.size() {
            item.set_size(SizeSpec::Relative(fr / weight_sum));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Direction, DragBar, Group, Leaf};

    fn leaf(id: &str, size: &str) -> DistributionNode {
        Leaf::new(id, size.parse().unwrap()).into()
    }

    fn leaf_with_min(id: &str, size: &str, min: &str) -> DistributionNode {
        Leaf::new(id, size.parse().unwrap())
            .with_min_size(min.parse().unwrap())
            .into()
    }

    fn promotion_tree() -> DistributionTree {
        DistributionTree::new(
            Direction::Rows,
            vec![
                Group::new(
                    "sub",
                    Direction::Columns,
                    vec![
                        leaf_with_min("A", "100px", "200px"),
                        leaf_with_min("B", "1fr", "250px"),
                        leaf_with_min("C", "270px", "400px"),
                    ],
                )
                .into(),
                leaf_with_min("D", "250px", "249px"),
                leaf_with_min("E", "250px", "251px"),
            ],
        )
    }

    #[test]
    fn promotes_pixels_below_minimum() {
        let mut tree = promotion_tree();
        let index = normalize(&mut tree, SizingContext::DEFAULT).unwrap();

        assert_eq!(tree.find("A").unwrap().size().to_string(), "200px");
        assert_eq!(tree.find("C").unwrap().size().to_string(), "400px");
        assert_eq!(tree.find("D").unwrap().size().to_string(), "250px");
        assert_eq!(tree.find("E").unwrap().size().to_string(), "251px");
        assert_eq!(tree.find("B").unwrap().size().to_string(), "1fr");
        assert_eq!(index.root_fixed_sizes_sum(), 501.0);
        assert_eq!(index.fixed_sizes_sum(&ParentRef::group("sub")), Some(600.0));
    }

    #[test]
    fn rescales_relative_pool_to_one() {
        let mut tree = DistributionTree::new(
            Direction::Columns,
            vec![leaf("a", "1fr"), leaf("b", "2fr"), leaf("c", "100px"), leaf("d", "1fr")],
        );
        normalize(&mut tree, SizingContext::DEFAULT).unwrap();

        assert_eq!(tree.find("a").unwrap().size().to_string(), "0.25fr");
        assert_eq!(tree.find("b").unwrap().size().to_string(), "0.5fr");
        assert_eq!(tree.find("c").unwrap().size().to_string(), "100px");
        assert_eq!(tree.find("d").unwrap().size().to_string(), "0.25fr");
    }

    #[test]
    fn pixel_only_list_skips_rescaling() {
        let mut tree = DistributionTree::new(
            Direction::Columns,
            vec![leaf("a", "100px"), leaf("b", "50px")],
        );
        let index = normalize(&mut tree, SizingContext::DEFAULT).unwrap();
        assert_eq!(index.root_fixed_sizes_sum(), 150.0);
        assert_eq!(index.actual_size("b"), Some("50px"));
    }

    #[test]
    fn budget_counts_offsets_and_visible_bars_except_last() {
        let mut tree = DistributionTree::new(
            Direction::Columns,
            vec![
                Leaf::new("a", SizeSpec::px(100.0))
                    .with_drag_bar(DragBar::sized(6.0))
                    .into(),
                Leaf::new("b", SizeSpec::fr(1.0))
                    .with_fixed_offset(-20.0)
                    .with_drag_bar(DragBar::hidden())
                    .into(),
                Leaf::new("c", SizeSpec::fr(1.0)).into(),
                Leaf::new("d", SizeSpec::fr(1.0))
                    .with_drag_bar(DragBar::sized(50.0))
                    .into(),
            ],
        );
        let sizing = SizingContext {
            fixed_sizes_sum_var: "--sum",
            default_drag_bar_size: 4.0,
        };
        let index = normalize(&mut tree, sizing).unwrap();
        // 100 + 6 (a) - 20 + 0 (hidden) + 4 (c default) + 0 (d is last)
        assert_eq!(index.root_fixed_sizes_sum(), 90.0);
    }

    #[test]
    fn records_entries_with_parents_and_expressions() {
        let mut tree = promotion_tree();
        let index = normalize(&mut tree, SizingContext::DEFAULT).unwrap();

        assert_eq!(index.len(), 6);
        assert_eq!(index.parent_of("A"), Some(&ParentRef::group("sub")));
        assert_eq!(index.parent_of("sub"), Some(&ParentRef::Root));
        assert!(index.get("sub").unwrap().is_group());
        assert!(!index.get("A").unwrap().is_group());
        assert_eq!(
            index.actual_size("B"),
            Some("calc(100% - 1 * var(--fixed-sizes-sum))")
        );
    }

    #[test]
    fn second_pass_is_identical() {
        let mut tree = DistributionTree::new(
            Direction::Rows,
            vec![leaf("a", "1fr"), leaf("b", "1fr"), leaf("c", "1fr"), leaf_with_min("d", "10px", "40px")],
        );
        let first = normalize(&mut tree, SizingContext::DEFAULT).unwrap();
        let snapshot = tree.to_json().unwrap();
        let second = normalize(&mut tree, SizingContext::DEFAULT).unwrap();

        assert_eq!(tree.to_json().unwrap(), snapshot);
        assert_eq!(first.root_fixed_sizes_sum(), second.root_fixed_sizes_sum());
    }

    #[test]
    fn empty_group_is_rejected() {
        let mut tree = DistributionTree::new(
            Direction::Rows,
            vec![Group::new("g", Direction::Columns, Vec::new()).into()],
        );
        let err = normalize(&mut tree, SizingContext::DEFAULT).unwrap_err();
        assert!(matches!(err, LayoutError::EmptyGroup(ref id) if id == "g"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut tree = DistributionTree::new(
            Direction::Rows,
            vec![
                leaf("a", "1fr"),
                Group::new("g", Direction::Columns, vec![leaf("a", "1fr")]).into(),
            ],
        );
        let err = normalize(&mut tree, SizingContext::DEFAULT).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn normalized_leaves_source_untouched() {
        let tree = DistributionTree::new(Direction::Rows, vec![leaf("a", "3fr"), leaf("b", "1fr")]);
        let (copy, _) = normalized(&tree, SizingContext::DEFAULT).unwrap();
        assert_eq!(tree.find("a").unwrap().size().to_string(), "3fr");
        assert_eq!(copy.find("a").unwrap().size().to_string(), "0.75fr");
    }
}
