use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::size::{SizeSpec, relative_size_expression};

/// Axis along which a group lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Rows,
    Columns,
}

/// Unique identifier for distribution items.
pub type ItemId = String;

/// Drag bar reserved after a pane, between it and its next sibling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragBar {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
}

impl DragBar {
    pub fn sized(size: f64) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }
}

/// Terminal pane of the distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub id: ItemId,
    pub size: SizeSpec,
    pub min_size: Option<SizeSpec>,
    pub fixed_offset_size: Option<f64>,
    pub drag_bar: Option<DragBar>,
}

impl Leaf {
    pub fn new(id: impl Into<ItemId>, size: SizeSpec) -> Self {
        Self {
            id: id.into(),
            size,
            min_size: None,
            fixed_offset_size: None,
            drag_bar: None,
        }
    }

    pub fn with_min_size(mut self, min_size: SizeSpec) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn with_fixed_offset(mut self, offset: f64) -> Self {
        self.fixed_offset_size = Some(offset);
        self
    }

    pub fn with_drag_bar(mut self, drag_bar: DragBar) -> Self {
        self.drag_bar = Some(drag_bar);
        self
    }
}

/// Nested sibling list laid out along its own direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: ItemId,
    pub direction: Direction,
    pub size: Option<SizeSpec>,
    pub min_size: Option<SizeSpec>,
    pub fixed_offset_size: Option<f64>,
    pub drag_bar: Option<DragBar>,
    pub items: Vec<DistributionNode>,
}

impl Group {
    pub fn new(id: impl Into<ItemId>, direction: Direction, items: Vec<DistributionNode>) -> Self {
        Self {
            id: id.into(),
            direction,
            size: None,
            min_size: None,
            fixed_offset_size: None,
            drag_bar: None,
            items,
        }
    }

    pub fn with_size(mut self, size: SizeSpec) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_drag_bar(mut self, drag_bar: DragBar) -> Self {
        self.drag_bar = Some(drag_bar);
        self
    }
}

/// Distribution tree node (group or leaf).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum DistributionNode {
    Leaf(Leaf),
    Group(Group),
}

impl From<Leaf> for DistributionNode {
    fn from(leaf: Leaf) -> Self {
        DistributionNode::Leaf(leaf)
    }
}

impl From<Group> for DistributionNode {
    fn from(group: Group) -> Self {
        DistributionNode::Group(group)
    }
}

impl DistributionNode {
    pub fn id(&self) -> &str {
        match self {
            DistributionNode::Leaf(leaf) => &leaf.id,
            DistributionNode::Group(group) => &group.id,
        }
    }

    /// Declared size; groups without one count as `1fr`.
    pub fn size(&self) -> SizeSpec {
        match self {
            DistributionNode::Leaf(leaf) => leaf.size,
            DistributionNode::Group(group) => group.size.unwrap_or(SizeSpec::Relative(1.0)),
        }
    }

    pub fn set_size(&mut self, size: SizeSpec) {
        match self {
            DistributionNode::Leaf(leaf) => leaf.size = size,
            DistributionNode::Group(group) => group.size = Some(size),
        }
    }

    pub fn min_size(&self) -> Option<SizeSpec> {
        match self {
            DistributionNode::Leaf(leaf) => leaf.min_size,
            DistributionNode::Group(group) => group.min_size,
        }
    }

    pub fn fixed_offset_size(&self) -> Option<f64> {
        match self {
            DistributionNode::Leaf(leaf) => leaf.fixed_offset_size,
            DistributionNode::Group(group) => group.fixed_offset_size,
        }
    }

    /// Stores the offset, dropping it entirely once it returns to zero.
    pub fn set_fixed_offset_size(&mut self, offset: Option<f64>) {
        let offset = offset.filter(|value| *value != 0.0);
        match self {
            DistributionNode::Leaf(leaf) => leaf.fixed_offset_size = offset,
            DistributionNode::Group(group) => group.fixed_offset_size = offset,
        }
    }

    pub fn drag_bar(&self) -> Option<&DragBar> {
        match self {
            DistributionNode::Leaf(leaf) => leaf.drag_bar.as_ref(),
            DistributionNode::Group(group) => group.drag_bar.as_ref(),
        }
    }

    pub fn drag_bar_hidden(&self) -> bool {
        self.drag_bar().map(|bar| bar.hidden).unwrap_or(false)
    }

    /// Pixels reserved for the bar after this pane; zero when hidden.
    pub fn drag_bar_size(&self, default_size: f64) -> f64 {
        match self.drag_bar() {
            Some(bar) if bar.hidden => 0.0,
            Some(bar) => bar.size.unwrap_or(default_size),
            None => default_size,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, DistributionNode::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            DistributionNode::Group(group) => Some(group),
            DistributionNode::Leaf(_) => None,
        }
    }

    pub fn has_absolute_value(&self) -> bool {
        self.size().is_absolute()
    }

    pub fn px_value(&self) -> Option<f64> {
        self.size().px_value()
    }

    pub fn fr_value(&self) -> Option<f64> {
        self.size().fr_value()
    }

    /// CSS value the rendering layer assigns to this pane's track.
    pub fn actual_size(&self, fixed_sizes_sum_var: &str) -> String {
        relative_size_expression(self.size(), self.fixed_offset_size(), fixed_sizes_sum_var)
    }
}

/// Names a sibling list: the root sentinel or a group by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentRef {
    Root,
    Group(ItemId),
}

impl ParentRef {
    pub fn group(id: impl Into<ItemId>) -> Self {
        ParentRef::Group(id.into())
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Root => f.write_str("<root>"),
            ParentRef::Group(id) => f.write_str(id),
        }
    }
}

/// Root sentinel of a distribution: a direction and its top-level items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionTree {
    pub direction: Direction,
    pub items: Vec<DistributionNode>,
}

impl DistributionTree {
    pub fn new(direction: Direction, items: Vec<DistributionNode>) -> Self {
        Self { direction, items }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn find(&self, id: &str) -> Option<&DistributionNode> {
        find_in(&self.items, id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut DistributionNode> {
        find_in_mut(&mut self.items, id)
    }

    pub fn items(&self, parent: &ParentRef) -> Option<&Vec<DistributionNode>> {
        match parent {
            ParentRef::Root => Some(&self.items),
            ParentRef::Group(id) => match self.find(id)? {
                DistributionNode::Group(group) => Some(&group.items),
                DistributionNode::Leaf(_) => None,
            },
        }
    }

    pub fn items_mut(&mut self, parent: &ParentRef) -> Option<&mut Vec<DistributionNode>> {
        match parent {
            ParentRef::Root => Some(&mut self.items),
            ParentRef::Group(id) => match self.find_mut(id)? {
                DistributionNode::Group(group) => Some(&mut group.items),
                DistributionNode::Leaf(_) => None,
            },
        }
    }

    pub fn direction_of(&self, parent: &ParentRef) -> Option<Direction> {
        match parent {
            ParentRef::Root => Some(self.direction),
            ParentRef::Group(id) => self.find(id)?.as_group().map(|group| group.direction),
        }
    }

    /// Every sibling list in the tree, root first, in depth-first order.
    pub fn sibling_lists(&self) -> Vec<(ParentRef, Direction, &Vec<DistributionNode>)> {
        let mut lists = vec![(ParentRef::Root, self.direction, &self.items)];
        collect_lists(&self.items, &mut lists);
        lists
    }
}

fn find_in<'a>(items: &'a [DistributionNode], id: &str) -> Option<&'a DistributionNode> {
    for item in items {
        if item.id() == id {
            return Some(item);
        }
        if let DistributionNode::Group(group) = item {
            if let Some(found) = find_in(&group.items, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_in_mut<'a>(items: &'a mut [DistributionNode], id: &str) -> Option<&'a mut DistributionNode> {
    for item in items.iter_mut() {
        if item.id() == id {
            return Some(item);
        }
        if let DistributionNode::Group(group) = item {
            if let Some(found) = find_in_mut(&mut group.items, id) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_lists<'a>(
    items: &'a [DistributionNode],
    lists: &mut Vec<(ParentRef, Direction, &'a Vec<DistributionNode>)>,
) {
    for item in items {
        if let DistributionNode::Group(group) = item {
            lists.push((ParentRef::Group(group.id.clone()), group.direction, &group.items));
            collect_lists(&group.items, lists);
        }
    }
}

/// Wire shape shared by leaves and groups; a node with `items` is a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<SizeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_size: Option<SizeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fixed_offset_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    drag_bar: Option<DragBar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<DistributionNode>>,
}

impl TryFrom<RawNode> for DistributionNode {
    type Error = LayoutError;

    fn try_from(raw: RawNode) -> Result<Self> {
        match raw.items {
            Some(items) => {
                let direction = raw
                    .direction
                    .ok_or_else(|| LayoutError::NotAGroup(raw.id.clone()))?;
                Ok(DistributionNode::Group(Group {
                    id: raw.id,
                    direction,
                    size: raw.size,
                    min_size: raw.min_size,
                    fixed_offset_size: raw.fixed_offset_size,
                    drag_bar: raw.drag_bar,
                    items,
                }))
            }
            None => {
                let size = raw
                    .size
                    .ok_or_else(|| LayoutError::MalformedSize(format!("<missing size on `{}`>", raw.id)))?;
                Ok(DistributionNode::Leaf(Leaf {
                    id: raw.id,
                    size,
                    min_size: raw.min_size,
                    fixed_offset_size: raw.fixed_offset_size,
                    drag_bar: raw.drag_bar,
                }))
            }
        }
    }
}

impl From<DistributionNode> for RawNode {
    fn from(node: DistributionNode) -> Self {
        match node {
            DistributionNode::Leaf(leaf) => RawNode {
                id: leaf.id,
                direction: None,
                size: Some(leaf.size),
                min_size: leaf.min_size,
                fixed_offset_size: leaf.fixed_offset_size,
                drag_bar: leaf.drag_bar,
                items: None,
            },
            DistributionNode::Group(group) => RawNode {
                id: group.id,
                direction: Some(group.direction),
                size: group.size,
                min_size: group.min_size,
                fixed_offset_size: group.fixed_offset_size,
                drag_bar: group.drag_bar,
                items: Some(group.items),
            },
        }
    }
}
