use crate::layout::{Direction, DistributionNode};
use crate::size::SizeSpec;

/// Geometry of the container the dragged bar lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInput {
    pub pixel_delta: f64,
    pub container_fixed_sizes_sum: f64,
    pub container_size_px: f64,
    pub rtl: bool,
    pub direction: Direction,
    /// Keep both panes at or above their minimum size (zero without one).
    /// Sessions turn this on by default; when off, the delta is applied
    /// as given and a pane may end up below its minimum or negative.
    pub clamp_to_min_size: bool,
}

impl DragInput {
    /// Pixels shared by the relative pool of the container.
    pub fn remaining_relative_px(&self) -> f64 {
        self.container_size_px - self.container_fixed_sizes_sum
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragResult {
    /// Document-direction pixels actually moved after RTL resolution and clamping.
    pub applied_delta: f64,
    pub start_size: SizeSpec,
    pub end_size: SizeSpec,
}

/// Columns dragged in a right-to-left context move the boundary the other way.
pub fn resolve_delta(pixel_delta: f64, rtl: bool, direction: Direction) -> f64 {
    if rtl && direction == Direction::Columns {
        -pixel_delta
    } else {
        pixel_delta
    }
}

/// Pixel length a pane occupies given the relative pool of its container.
pub fn rendered_px(node: &DistributionNode, remaining_relative_px: f64) -> f64 {
    match node.size() {
        SizeSpec::Absolute(px) => px,
        SizeSpec::Relative(fr) => {
            fr * remaining_relative_px.max(0.0) + node.fixed_offset_size().unwrap_or(0.0)
        }
    }
}

fn floor_px(node: &DistributionNode, remaining_relative_px: f64) -> f64 {
    let floor = match node.min_size() {
        Some(SizeSpec::Absolute(px)) => px,
        Some(SizeSpec::Relative(fr)) => fr * remaining_relative_px.max(0.0),
        None => 0.0,
    };
    floor.max(0.0)
}

fn clamp_delta(
    start: &DistributionNode,
    end: &DistributionNode,
    delta: f64,
    remaining_relative_px: f64,
) -> f64 {
    let can_shrink = (rendered_px(start, remaining_relative_px) - floor_px(start, remaining_relative_px)).max(0.0);
    let can_grow = (rendered_px(end, remaining_relative_px) - floor_px(end, remaining_relative_px)).max(0.0);
    delta.clamp(-can_shrink, can_grow)
}

fn shift_offset(node: &mut DistributionNode, delta: f64) {
    let offset = node.fixed_offset_size().unwrap_or(0.0) + delta;
    node.set_fixed_offset_size(Some(offset));
}

/// Move the boundary between `start` and the `end` pane that follows it.
///
/// `start` grows by the resolved delta and `end` shrinks by the same amount.
/// A pixel pane changes its pixels; a relative pane facing a pixel pane
/// absorbs the change in its `fixed_offset_size` so the weights of unrelated
/// relative siblings stay put; two relative panes trade `fr` weight.
pub fn apply_drag(
    start: &mut DistributionNode,
    end: &mut DistributionNode,
    input: DragInput,
) -> DragResult {
    let remaining = input.remaining_relative_px();
    let mut delta = resolve_delta(input.pixel_delta, input.rtl, input.direction);
    if input.clamp_to_min_size {
        delta = clamp_delta(start, end, delta, remaining);
    }

    match (start.size(), end.size()) {
        (SizeSpec::Absolute(start_px), SizeSpec::Absolute(end_px)) => {
            start.set_size(SizeSpec::Absolute(start_px + delta));
            end.set_size(SizeSpec::Absolute(end_px - delta));
        }
        (SizeSpec::Absolute(start_px), SizeSpec::Relative(_)) => {
            start.set_size(SizeSpec::Absolute(start_px + delta));
            shift_offset(end, -delta);
        }
        (SizeSpec::Relative(_), SizeSpec::Absolute(end_px)) => {
            shift_offset(start, delta);
            end.set_size(SizeSpec::Absolute(end_px - delta));
        }
        (SizeSpec::Relative(start_fr), SizeSpec::Relative(end_fr)) => {
            if remaining > 0.0 {
                let delta_fr = delta / remaining;
                start.set_size(SizeSpec::Relative(start_fr + delta_fr));
                end.set_size(SizeSpec::Relative(end_fr - delta_fr));
            } else {
                delta = 0.0;
            }
        }
    }

    DragResult {
        applied_delta: delta,
        start_size: start.size(),
        end_size: end.size(),
    }
}
