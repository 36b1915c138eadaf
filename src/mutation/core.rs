use crate::error::{LayoutError, Result};
use crate::layout::{DistributionNode, DistributionTree, Group, ItemId, Leaf, ParentRef};
use crate::normalize::FlatIndex;
use crate::size::{SizeKind, SizeSpec};

/// Source of ids for panes created by the engine.
pub trait IdGenerator {
    fn next_id(&mut self) -> ItemId;
}

/// `<prefix>-<n>` ids counting up from one.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ItemId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    pub parent: ParentRef,
    pub sibling_id: ItemId,
    pub placement: Placement,
    pub leaf: Leaf,
    /// Split the sibling's size (and offset) evenly with the new leaf.
    pub take_half_of_sibling: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertOutcome {
    pub id: ItemId,
    pub parent: ParentRef,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedItem {
    pub old_id: ItemId,
    pub new_id: ItemId,
}

/// How the space of a removed pane reached its neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceTransfer {
    /// Pixels added onto a pixel neighbor.
    Pixels(f64),
    /// Weight (and offset) added onto a relative neighbor.
    Weight { fr: f64, offset: Option<f64> },
    /// A pixel pane's length added to a relative neighbor's offset.
    PixelsAsOffset(f64),
    /// A pixel neighbor taking over a relative pane's weight: it turns
    /// relative with weight `fr`, and its own length plus the removed offset
    /// (`pixels`) move into its offset.
    PixelsIntoWeight { fr: f64, pixels: f64 },
}

/// What to do when a removed pane and its neighbor use different units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixedTransferPolicy {
    #[default]
    Absorb,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoveOutcome {
    pub removed: DistributionNode,
    pub parent: ParentRef,
    /// Neighbor that received the freed space, or the collapsed group's slot.
    pub receiver: Option<ItemId>,
    pub transfer: Option<SpaceTransfer>,
    pub collapsed_group: Option<ItemId>,
    pub renamed_items: Vec<RenamedItem>,
}

/// Slot a new sibling lands in.
///
/// `Before` anchors one slot ahead of the sibling's current index (clamped at
/// zero) and `After` lands right behind it.
pub fn insert_index(sibling_index: usize, placement: Placement) -> usize {
    match placement {
        Placement::Before => sibling_index.saturating_sub(1),
        Placement::After => sibling_index + 1,
    }
}

fn resolve_parent(index: &FlatIndex, parent: &ParentRef) -> Result<()> {
    match parent {
        ParentRef::Root => Ok(()),
        ParentRef::Group(id) => {
            let entry = index.get(id).ok_or_else(|| LayoutError::NotFound(id.clone()))?;
            if entry.is_group() {
                Ok(())
            } else {
                Err(LayoutError::NotAGroup(id.clone()))
            }
        }
    }
}

/// Insert `request.leaf` next to its sibling. Nothing is mutated on error.
pub fn insert_sibling(
    tree: &mut DistributionTree,
    index: &FlatIndex,
    request: InsertRequest,
) -> Result<InsertOutcome> {
    let InsertRequest {
        parent,
        sibling_id,
        placement,
        mut leaf,
        take_half_of_sibling,
    } = request;

    resolve_parent(index, &parent)?;
    if !index.contains(&sibling_id) {
        return Err(LayoutError::NotFound(sibling_id));
    }
    if index.contains(&leaf.id) {
        return Err(LayoutError::DuplicateId(leaf.id));
    }

    let items = tree
        .items_mut(&parent)
        .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;
    let sibling_index = items
        .iter()
        .position(|item| item.id() == sibling_id)
        .ok_or_else(|| LayoutError::NotAChild {
            parent: parent.to_string(),
            child: sibling_id.clone(),
        })?;

    if take_half_of_sibling {
        let sibling = &mut items[sibling_index];
        let half = sibling.size().halved();
        let half_offset = sibling.fixed_offset_size().map(|offset| offset / 2.0);
        sibling.set_size(half);
        sibling.set_fixed_offset_size(half_offset);
        leaf.size = half;
        leaf.fixed_offset_size = half_offset.filter(|offset| *offset != 0.0);
    }

    let position = insert_index(sibling_index, placement).min(items.len());
    let id = leaf.id.clone();
    items.insert(position, DistributionNode::Leaf(leaf));

    Ok(InsertOutcome {
        id,
        parent,
        position,
    })
}

/// Decide how `removed`'s space reaches `receiver` without touching either.
pub fn plan_transfer(
    removed: &DistributionNode,
    receiver: &DistributionNode,
    policy: MixedTransferPolicy,
) -> Result<SpaceTransfer> {
    let offset = removed.fixed_offset_size();
    let transfer = match (removed.size(), receiver.size()) {
        (SizeSpec::Absolute(px), SizeSpec::Absolute(_)) => SpaceTransfer::Pixels(px),
        (SizeSpec::Relative(fr), SizeSpec::Relative(_)) => SpaceTransfer::Weight { fr, offset },
        (removed_size, receiver_size) => {
            if policy == MixedTransferPolicy::Reject {
                return Err(LayoutError::UnsupportedTransfer {
                    from: removed_size.kind().as_str(),
                    into: receiver_size.kind().as_str(),
                });
            }
            match removed_size {
                SizeSpec::Absolute(px) => SpaceTransfer::PixelsAsOffset(px + offset.unwrap_or(0.0)),
                SizeSpec::Relative(fr) => SpaceTransfer::PixelsIntoWeight {
                    fr,
                    pixels: offset.unwrap_or(0.0),
                },
            }
        }
    };
    Ok(transfer)
}

pub fn apply_transfer(receiver: &mut DistributionNode, transfer: SpaceTransfer) {
    let size = receiver.size();
    match transfer {
        SpaceTransfer::Pixels(px) => {
            receiver.set_size(size.with_magnitude(size.magnitude() + px));
        }
        SpaceTransfer::PixelsIntoWeight { fr, pixels } => {
            let current = receiver.fixed_offset_size().unwrap_or(0.0);
            receiver.set_size(SizeSpec::Relative(fr));
            receiver.set_fixed_offset_size(Some(current + size.magnitude() + pixels));
        }
        SpaceTransfer::Weight { fr, offset } => {
            receiver.set_size(size.with_magnitude(size.magnitude() + fr));
            if let Some(offset) = offset {
                let current = receiver.fixed_offset_size().unwrap_or(0.0);
                receiver.set_fixed_offset_size(Some(current + offset));
            }
        }
        SpaceTransfer::PixelsAsOffset(px) => {
            let current = receiver.fixed_offset_size().unwrap_or(0.0);
            receiver.set_fixed_offset_size(Some(current + px));
        }
    }
}

/// Give `removed`'s space to `receiver`.
pub fn add_space_to_item(
    receiver: &mut DistributionNode,
    removed: &DistributionNode,
    policy: MixedTransferPolicy,
) -> Result<SpaceTransfer> {
    let transfer = plan_transfer(removed, receiver, policy)?;
    apply_transfer(receiver, transfer);
    Ok(transfer)
}

/// Remove `item_id` from the tree. Nothing is mutated on error.
pub fn remove_item(
    tree: &mut DistributionTree,
    index: &FlatIndex,
    item_id: &str,
    policy: MixedTransferPolicy,
) -> Result<RemoveOutcome> {
    let parent = index
        .parent_of(item_id)
        .cloned()
        .ok_or_else(|| LayoutError::NotFound(item_id.to_string()))?;
    let siblings = tree
        .items(&parent)
        .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;
    let position = siblings
        .iter()
        .position(|item| item.id() == item_id)
        .ok_or_else(|| LayoutError::NotAChild {
            parent: parent.to_string(),
            child: item_id.to_string(),
        })?;

    match (&parent, siblings.len()) {
        (ParentRef::Root, 1) => Err(LayoutError::LastItem),
        (ParentRef::Group(group_id), 1) => {
            let group_id = group_id.clone();
            remove_item(tree, index, &group_id, policy)
        }
        (ParentRef::Group(group_id), 2) => {
            let group_id = group_id.clone();
            collapse_group(tree, index, &group_id, position)
        }
        _ => splice_with_transfer(tree, parent, position, policy),
    }
}

fn splice_with_transfer(
    tree: &mut DistributionTree,
    parent: ParentRef,
    position: usize,
    policy: MixedTransferPolicy,
) -> Result<RemoveOutcome> {
    let items = tree
        .items_mut(&parent)
        .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;

    let receiver_position = if position == 0 { 1 } else { position - 1 };
    let transfer = plan_transfer(&items[position], &items[receiver_position], policy)?;

    let removed = items.remove(position);
    let receiver_position = if receiver_position > position {
        receiver_position - 1
    } else {
        receiver_position
    };
    let receiver = &mut items[receiver_position];
    apply_transfer(receiver, transfer);

    Ok(RemoveOutcome {
        removed,
        parent,
        receiver: Some(receiver.id().to_string()),
        transfer: Some(transfer),
        collapsed_group: None,
        renamed_items: Vec::new(),
    })
}

/// Drop child `removed_position` of a two-child group and let the surviving
/// child take over the group's slot under the group's id.
fn collapse_group(
    tree: &mut DistributionTree,
    index: &FlatIndex,
    group_id: &str,
    removed_position: usize,
) -> Result<RemoveOutcome> {
    let grandparent = index
        .parent_of(group_id)
        .cloned()
        .ok_or_else(|| LayoutError::NotFound(group_id.to_string()))?;
    let slots = tree
        .items_mut(&grandparent)
        .ok_or_else(|| LayoutError::NotFound(grandparent.to_string()))?;
    let slot = slots
        .iter()
        .position(|item| item.id() == group_id && item.is_group())
        .ok_or_else(|| LayoutError::NotAGroup(group_id.to_string()))?;

    let DistributionNode::Group(mut group) = slots.remove(slot) else {
        return Err(LayoutError::NotAGroup(group_id.to_string()));
    };
    let removed = group.items.remove(removed_position);
    let survivor = group.items.remove(0);
    let renamed = RenamedItem {
        old_id: survivor.id().to_string(),
        new_id: group.id.clone(),
    };

    slots.insert(slot, merge_into_slot(survivor, group));

    Ok(RemoveOutcome {
        removed,
        parent: ParentRef::Group(group_id.to_string()),
        receiver: Some(group_id.to_string()),
        transfer: None,
        collapsed_group: Some(group_id.to_string()),
        renamed_items: vec![renamed],
    })
}

/// The slot keeps the group's id, size, drag bar and offset; everything else
/// comes from the survivor.
fn merge_into_slot(survivor: DistributionNode, group: Group) -> DistributionNode {
    let Group {
        id,
        size,
        fixed_offset_size,
        drag_bar,
        ..
    } = group;

    match survivor {
        DistributionNode::Leaf(leaf) => DistributionNode::Leaf(Leaf {
            id,
            size: size.unwrap_or(SizeSpec::Relative(1.0)),
            min_size: leaf.min_size,
            fixed_offset_size,
            drag_bar,
        }),
        DistributionNode::Group(inner) => DistributionNode::Group(Group {
            id,
            direction: inner.direction,
            size,
            min_size: inner.min_size,
            fixed_offset_size,
            drag_bar,
            items: inner.items,
        }),
    }
}

impl SpaceTransfer {
    pub fn is_mixed(&self) -> bool {
        matches!(
            self,
            SpaceTransfer::PixelsAsOffset(_) | SpaceTransfer::PixelsIntoWeight { .. }
        )
    }

    /// Unit the receiving neighbor had before the transfer.
    pub fn receiver_kind(&self) -> SizeKind {
        match self {
            SpaceTransfer::Pixels(_) | SpaceTransfer::PixelsIntoWeight { .. } => SizeKind::Absolute,
            SpaceTransfer::Weight { .. } | SpaceTransfer::PixelsAsOffset(_) => SizeKind::Relative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Direction;
    use crate::normalize::{SizingContext, normalize};

    fn leaf(id: &str, size: &str) -> DistributionNode {
        Leaf::new(id, size.parse().unwrap()).into()
    }

    fn ids(items: &[DistributionNode]) -> Vec<&str> {
        items.iter().map(DistributionNode::id).collect()
    }

    fn prepared(mut tree: DistributionTree) -> (DistributionTree, FlatIndex) {
        let index = normalize(&mut tree, SizingContext::DEFAULT).unwrap();
        (tree, index)
    }

    fn row_of_three() -> (DistributionTree, FlatIndex) {
        prepared(DistributionTree::new(
            Direction::Columns,
            vec![leaf("a", "1fr"), leaf("b", "1fr"), leaf("c", "1fr")],
        ))
    }

    fn request(sibling: &str, placement: Placement, id: &str, take_half: bool) -> InsertRequest {
        InsertRequest {
            parent: ParentRef::Root,
            sibling_id: sibling.to_string(),
            placement,
            leaf: Leaf::new(id, SizeSpec::px(40.0)),
            take_half_of_sibling: take_half,
        }
    }

    #[test]
    fn insert_index_rules() {
        assert_eq!(insert_index(0, Placement::Before), 0);
        assert_eq!(insert_index(2, Placement::Before), 1);
        assert_eq!(insert_index(2, Placement::After), 3);
    }

    #[test]
    fn insert_after_appends_at_end() {
        let (mut tree, index) = row_of_three();
        let outcome = insert_sibling(&mut tree, &index, request("c", Placement::After, "n", false)).unwrap();
        assert_eq!(outcome.position, 3);
        assert_eq!(ids(&tree.items), ["a", "b", "c", "n"]);
        assert_eq!(tree.find("n").unwrap().size(), SizeSpec::px(40.0));
    }

    #[test]
    fn insert_before_anchors_one_slot_ahead() {
        let (mut tree, index) = row_of_three();
        insert_sibling(&mut tree, &index, request("c", Placement::Before, "n", false)).unwrap();
        assert_eq!(ids(&tree.items), ["a", "n", "b", "c"]);
    }

    #[test]
    fn take_half_splits_size_and_offset() {
        let (mut tree, _) = row_of_three();
        tree.find_mut("b").unwrap().set_fixed_offset_size(Some(-30.0));
        let index = normalize(&mut tree, SizingContext::DEFAULT).unwrap();

        insert_sibling(&mut tree, &index, request("b", Placement::After, "n", true)).unwrap();
        let b = tree.find("b").unwrap();
        let n = tree.find("n").unwrap();
        assert_eq!(b.size(), n.size());
        assert!((n.fr_value().unwrap() - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(b.fixed_offset_size(), Some(-15.0));
        assert_eq!(n.fixed_offset_size(), Some(-15.0));
    }

    #[test]
    fn insert_rejects_unknown_ids_without_mutating() {
        let (mut tree, index) = row_of_three();
        let before = tree.clone();

        let err = insert_sibling(&mut tree, &index, request("zz", Placement::After, "n", false)).unwrap_err();
        assert!(matches!(err, LayoutError::NotFound(ref id) if id == "zz"));

        let mut bad_parent = request("a", Placement::After, "n", false);
        bad_parent.parent = ParentRef::group("nope");
        let err = insert_sibling(&mut tree, &index, bad_parent).unwrap_err();
        assert!(matches!(err, LayoutError::NotFound(ref id) if id == "nope"));

        let err = insert_sibling(&mut tree, &index, request("a", Placement::After, "b", false)).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId(_)));

        assert_eq!(tree, before);
    }

    #[test]
    fn insert_rejects_leaf_as_parent() {
        let (mut tree, index) = row_of_three();
        let mut req = request("a", Placement::After, "n", false);
        req.parent = ParentRef::group("a");
        let err = insert_sibling(&mut tree, &index, req).unwrap_err();
        assert!(matches!(err, LayoutError::NotAGroup(_)));
    }

    #[test]
    fn remove_gives_weight_to_previous_sibling() {
        let (mut tree, index) = row_of_three();
        let outcome = remove_item(&mut tree, &index, "b", MixedTransferPolicy::Absorb).unwrap();

        assert_eq!(ids(&tree.items), ["a", "c"]);
        assert_eq!(outcome.receiver.as_deref(), Some("a"));
        assert!((tree.find("a").unwrap().fr_value().unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!(outcome.renamed_items.is_empty());
    }

    #[test]
    fn remove_first_gives_space_to_next() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Columns,
            vec![leaf("a", "100px"), leaf("b", "50px"), leaf("c", "1fr")],
        ));
        let outcome = remove_item(&mut tree, &index, "a", MixedTransferPolicy::Absorb).unwrap();
        assert_eq!(outcome.receiver.as_deref(), Some("b"));
        assert_eq!(tree.find("b").unwrap().size(), SizeSpec::px(150.0));
        assert_eq!(outcome.transfer, Some(SpaceTransfer::Pixels(100.0)));
    }

    #[test]
    fn weight_transfer_carries_offset() {
        let mut removed: DistributionNode = Leaf::new("r", SizeSpec::fr(0.25)).with_fixed_offset(12.0).into();
        let mut receiver: DistributionNode = Leaf::new("n", SizeSpec::fr(0.25)).with_fixed_offset(3.0).into();
        add_space_to_item(&mut receiver, &removed, MixedTransferPolicy::Absorb).unwrap();
        assert_eq!(receiver.size(), SizeSpec::fr(0.5));
        assert_eq!(receiver.fixed_offset_size(), Some(15.0));

        removed.set_fixed_offset_size(None);
        add_space_to_item(&mut receiver, &removed, MixedTransferPolicy::Absorb).unwrap();
        assert_eq!(receiver.fixed_offset_size(), Some(15.0));
    }

    #[test]
    fn mixed_transfer_policies() {
        let pixels: DistributionNode = Leaf::new("p", SizeSpec::px(80.0)).into();
        let mut relative: DistributionNode = Leaf::new("r", SizeSpec::fr(1.0)).into();

        let err = add_space_to_item(&mut relative, &pixels, MixedTransferPolicy::Reject).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedTransfer { from: "absolute", into: "relative" }));
        assert_eq!(relative.fixed_offset_size(), None);

        let transfer = add_space_to_item(&mut relative, &pixels, MixedTransferPolicy::Absorb).unwrap();
        assert!(transfer.is_mixed());
        assert_eq!(relative.fixed_offset_size(), Some(80.0));

        let mut pixel_receiver = pixels.clone();
        let offset_relative: DistributionNode = Leaf::new("o", SizeSpec::fr(0.5)).with_fixed_offset(-10.0).into();
        let transfer = add_space_to_item(&mut pixel_receiver, &offset_relative, MixedTransferPolicy::Absorb).unwrap();
        assert_eq!(transfer, SpaceTransfer::PixelsIntoWeight { fr: 0.5, pixels: -10.0 });
        assert_eq!(pixel_receiver.size(), SizeSpec::fr(0.5));
        assert_eq!(pixel_receiver.fixed_offset_size(), Some(70.0));
    }

    #[test]
    fn pixel_neighbor_takes_over_removed_weight() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Columns,
            vec![leaf("x", "1fr"), leaf("a", "100px"), leaf("b", "1fr")],
        ));
        let outcome = remove_item(&mut tree, &index, "b", MixedTransferPolicy::Absorb).unwrap();

        assert_eq!(outcome.receiver.as_deref(), Some("a"));
        assert_eq!(outcome.transfer, Some(SpaceTransfer::PixelsIntoWeight { fr: 0.5, pixels: 0.0 }));
        assert_eq!(tree.find("x").unwrap().size(), SizeSpec::fr(0.5));
        assert_eq!(tree.find("a").unwrap().size(), SizeSpec::fr(0.5));
        assert_eq!(tree.find("a").unwrap().fixed_offset_size(), Some(100.0));
    }

    #[test]
    fn last_pixel_neighbor_fills_the_list() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Columns,
            vec![leaf("a", "100px"), leaf("b", "1fr")],
        ));
        remove_item(&mut tree, &index, "b", MixedTransferPolicy::Absorb).unwrap();

        let index = normalize(&mut tree, SizingContext::DEFAULT).unwrap();
        assert_eq!(index.root_fixed_sizes_sum(), 100.0);
        assert_eq!(
            index.actual_size("a"),
            Some("calc(100% - 1 * var(--fixed-sizes-sum) + 100px)")
        );
    }

    #[test]
    fn rejected_mixed_remove_leaves_tree_untouched() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Columns,
            vec![leaf("a", "100px"), leaf("b", "1fr"), leaf("c", "1fr")],
        ));
        let before = tree.clone();
        let err = remove_item(&mut tree, &index, "b", MixedTransferPolicy::Reject).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedTransfer { .. }));
        assert_eq!(tree, before);
    }

    #[test]
    fn two_child_group_collapses_into_its_slot() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Rows,
            vec![
                Group::new("G", Direction::Columns, vec![leaf("P", "300px"), leaf("Q", "1fr")])
                    .with_size(SizeSpec::px(400.0))
                    .into(),
                leaf("R", "1fr"),
            ],
        ));
        let outcome = remove_item(&mut tree, &index, "Q", MixedTransferPolicy::Absorb).unwrap();

        assert_eq!(
            outcome.renamed_items,
            vec![RenamedItem {
                old_id: "P".into(),
                new_id: "G".into()
            }]
        );
        assert_eq!(outcome.collapsed_group.as_deref(), Some("G"));
        assert_eq!(ids(&tree.items), ["G", "R"]);
        let slot = tree.find("G").unwrap();
        assert!(!slot.is_group());
        assert_eq!(slot.size(), SizeSpec::px(400.0));
        assert!(tree.find("P").is_none());
    }

    #[test]
    fn surviving_group_keeps_its_children() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Rows,
            vec![
                Group::new(
                    "G",
                    Direction::Columns,
                    vec![
                        leaf("P", "1fr"),
                        Group::new("H", Direction::Rows, vec![leaf("x", "1fr"), leaf("y", "1fr")]).into(),
                    ],
                )
                .into(),
                leaf("R", "1fr"),
            ],
        ));
        let outcome = remove_item(&mut tree, &index, "P", MixedTransferPolicy::Absorb).unwrap();

        assert_eq!(outcome.renamed_items[0].old_id, "H");
        let slot = tree.find("G").unwrap().as_group().unwrap();
        assert_eq!(slot.direction, Direction::Rows);
        assert_eq!(ids(&slot.items), ["x", "y"]);
    }

    #[test]
    fn root_pair_splices_instead_of_collapsing() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Rows,
            vec![leaf("a", "1fr"), leaf("b", "1fr")],
        ));
        let outcome = remove_item(&mut tree, &index, "a", MixedTransferPolicy::Absorb).unwrap();
        assert!(outcome.collapsed_group.is_none());
        assert_eq!(ids(&tree.items), ["b"]);
        assert_eq!(tree.find("b").unwrap().size(), SizeSpec::fr(1.0));

        let index = normalize(&mut tree, SizingContext::DEFAULT).unwrap();
        let err = remove_item(&mut tree, &index, "b", MixedTransferPolicy::Absorb).unwrap_err();
        assert!(matches!(err, LayoutError::LastItem));
    }

    #[test]
    fn removing_only_child_removes_group() {
        let (mut tree, index) = prepared(DistributionTree::new(
            Direction::Rows,
            vec![
                Group::new("solo", Direction::Columns, vec![leaf("only", "1fr")]).into(),
                leaf("a", "1fr"),
                leaf("b", "1fr"),
            ],
        ));
        let outcome = remove_item(&mut tree, &index, "only", MixedTransferPolicy::Absorb).unwrap();
        assert_eq!(outcome.removed.id(), "solo");
        assert_eq!(ids(&tree.items), ["a", "b"]);
    }

    #[test]
    fn unknown_item_is_not_found() {
        let (mut tree, index) = row_of_three();
        let err = remove_item(&mut tree, &index, "ghost", MixedTransferPolicy::Absorb).unwrap_err();
        assert!(matches!(err, LayoutError::NotFound(ref id) if id == "ghost"));
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new("pane");
        assert_eq!(ids.next_id(), "pane-1");
        assert_eq!(ids.next_id(), "pane-2");
    }
}
