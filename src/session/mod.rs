//! Distribution session: one owned tree, its flat index and the render
//! surfaces derived from them, kept in lockstep across every operation.

use serde_json::json;

use crate::drag::{self, DragInput};
use crate::error::{LayoutError, Result};
use crate::layout::{DistributionTree, ItemId, Leaf, ParentRef, grid_template};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::{EngineMetrics, MetricSnapshot};
use crate::mutation::{
    self, IdGenerator, InsertOutcome, InsertRequest, MixedTransferPolicy, Placement, RemoveOutcome,
};
use crate::normalize::{DEFAULT_FIXED_SIZES_SUM_VAR, FlatIndex, SizingContext, normalize};
use crate::registry::{GroupSurface, SurfaceRegistry};
use crate::size::SizeSpec;

pub const DEFAULT_LOG_TARGET: &str = "split::distribution";

/// Configuration knobs for a distribution session.
#[derive(Debug, Clone)]
pub struct DistributionConfig {
    /// Custom property relative size expressions read the fixed budget from.
    pub fixed_sizes_sum_var: String,
    /// Pixels reserved for drag bars that do not declare a size.
    pub default_drag_bar_size: f64,
    /// Stop drags before either pane drops below its minimum size. On by
    /// default; turn off to apply every delta unchanged.
    pub clamp_to_min_size: bool,
    /// Handling of removals between a pixel pane and a relative pane.
    pub mixed_transfer: MixedTransferPolicy,
    /// Optional structured logger used by the session.
    pub logger: Option<Logger>,
    /// Target field used on every emitted event.
    pub log_target: String,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            fixed_sizes_sum_var: DEFAULT_FIXED_SIZES_SUM_VAR.to_string(),
            default_drag_bar_size: 0.0,
            clamp_to_min_size: true,
            mixed_transfer: MixedTransferPolicy::Absorb,
            logger: None,
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }
}

impl DistributionConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn sizing(&self) -> SizingContext<'_> {
        SizingContext {
            fixed_sizes_sum_var: &self.fixed_sizes_sum_var,
            default_drag_bar_size: self.default_drag_bar_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub parent: ParentRef,
    pub applied_delta: f64,
    pub start_size: SizeSpec,
    pub end_size: SizeSpec,
    /// Re-emitted track list of the whole sibling list.
    pub grid_template: String,
}

/// Owns a distribution tree and keeps its flat index and surfaces current.
///
/// Operations mutate in place; [`Distribution::edited`] offers the
/// copy-on-write alternative.
#[derive(Debug, Clone)]
pub struct Distribution {
    tree: DistributionTree,
    index: FlatIndex,
    config: DistributionConfig,
    metrics: EngineMetrics,
    surfaces: SurfaceRegistry,
}

impl Distribution {
    /// Take ownership of `tree` and normalize it.
    pub fn new(tree: DistributionTree, config: DistributionConfig) -> Result<Self> {
        let mut session = Self {
            tree,
            index: FlatIndex::default(),
            config,
            metrics: EngineMetrics::new(),
            surfaces: SurfaceRegistry::new(),
        };
        session.renormalize()?;
        Ok(session)
    }

    pub fn from_json(json: &str, config: DistributionConfig) -> Result<Self> {
        Self::new(DistributionTree::from_json(json)?, config)
    }

    pub fn tree(&self) -> &DistributionTree {
        &self.tree
    }

    pub fn into_tree(self) -> DistributionTree {
        self.tree
    }

    pub fn to_json(&self) -> Result<String> {
        self.tree.to_json()
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    pub fn root_fixed_sizes_sum(&self) -> f64 {
        self.index.root_fixed_sizes_sum()
    }

    pub fn metrics(&self) -> MetricSnapshot {
        self.metrics.snapshot()
    }

    /// Log the current metrics snapshot.
    pub fn emit_metrics(&self) {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = self.metrics.snapshot().to_log_event(&self.config.log_target);
            let _ = logger.log_event(event);
        }
    }

    /// Apply `edit` to a copy of this session and return the copy.
    pub fn edited<T, F>(&self, edit: F) -> Result<(Self, T)>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let mut copy = self.clone();
        let value = edit(&mut copy)?;
        Ok((copy, value))
    }

    /// Rebuild the flat index from the tree; returns the root budget.
    pub fn renormalize(&mut self) -> Result<f64> {
        self.index = normalize(&mut self.tree, self.config.sizing())?;
        self.metrics.record_normalization();
        self.sync_surfaces()?;

        let root_sum = self.index.root_fixed_sizes_sum();
        self.log_event(
            LogLevel::Debug,
            "normalized",
            [
                json_kv("items", json!(self.index.len())),
                json_kv("root_fixed_sizes_sum", json!(root_sum)),
            ],
        );
        Ok(root_sum)
    }

    pub fn grid_template(&self, parent: &ParentRef) -> Result<String> {
        let items = self
            .tree
            .items(parent)
            .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;
        let last_index = items.len().saturating_sub(1);
        grid_template(items, &self.index, last_index, self.config.sizing())
    }

    pub fn surface(&self, parent: &ParentRef) -> Option<&GroupSurface> {
        self.surfaces.surface(parent)
    }

    /// Surfaces whose template or budget changed since the last call.
    pub fn take_dirty_surfaces(&mut self) -> Vec<(ParentRef, GroupSurface)> {
        self.surfaces.take_dirty()
    }

    /// Drag the bar between `start_id` and the `end_id` pane right after it.
    ///
    /// `container_size_px` is the rendered length of the sibling list along
    /// its direction. Only the two panes and the list's surface change.
    pub fn apply_drag(
        &mut self,
        start_id: &str,
        end_id: &str,
        pixel_delta: f64,
        container_size_px: f64,
        rtl: bool,
    ) -> Result<DragOutcome> {
        match self.drag_inner(start_id, end_id, pixel_delta, container_size_px, rtl) {
            Ok(outcome) => {
                self.metrics.record_drag();
                self.log_event(
                    LogLevel::Trace,
                    "drag_applied",
                    [
                        json_str("start", start_id),
                        json_str("end", end_id),
                        json_kv("applied_delta", json!(outcome.applied_delta)),
                    ],
                );
                Ok(outcome)
            }
            Err(err) => Err(self.rejected("apply_drag", start_id, err)),
        }
    }

    fn drag_inner(
        &mut self,
        start_id: &str,
        end_id: &str,
        pixel_delta: f64,
        container_size_px: f64,
        rtl: bool,
    ) -> Result<DragOutcome> {
        let not_adjacent = || LayoutError::NotAdjacent {
            start: start_id.to_string(),
            end: end_id.to_string(),
        };

        let parent = self
            .index
            .parent_of(start_id)
            .cloned()
            .ok_or_else(|| LayoutError::NotFound(start_id.to_string()))?;
        let end_parent = self
            .index
            .parent_of(end_id)
            .ok_or_else(|| LayoutError::NotFound(end_id.to_string()))?;
        if *end_parent != parent {
            return Err(not_adjacent());
        }

        let container_fixed_sizes_sum = self
            .index
            .fixed_sizes_sum(&parent)
            .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;
        let direction = self
            .tree
            .direction_of(&parent)
            .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;

        let sizing = self.config.sizing();
        let items = self
            .tree
            .items_mut(&parent)
            .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;
        let start_position = items
            .iter()
            .position(|item| item.id() == start_id)
            .ok_or_else(not_adjacent)?;
        if items.get(start_position + 1).map(|item| item.id()) != Some(end_id) {
            return Err(not_adjacent());
        }

        let (head, tail) = items.split_at_mut(start_position + 1);
        let (start, end) = (&mut head[start_position], &mut tail[0]);
        let result = drag::apply_drag(
            start,
            end,
            DragInput {
                pixel_delta,
                container_fixed_sizes_sum,
                container_size_px,
                rtl,
                direction,
                clamp_to_min_size: self.config.clamp_to_min_size,
            },
        );
        self.index.refresh_actual_size(start, sizing);
        self.index.refresh_actual_size(end, sizing);

        let template = grid_template(items, &self.index, items.len() - 1, sizing)?;
        self.surfaces.update(
            parent.clone(),
            GroupSurface {
                direction,
                template: template.clone(),
                fixed_sizes_sum: container_fixed_sizes_sum,
            },
        );

        Ok(DragOutcome {
            parent,
            applied_delta: result.applied_delta,
            start_size: result.start_size,
            end_size: result.end_size,
            grid_template: template,
        })
    }

    /// Insert a new leaf next to an existing sibling.
    pub fn insert_sibling(&mut self, request: InsertRequest) -> Result<InsertOutcome> {
        let sibling_id = request.sibling_id.clone();
        let outcome = match mutation::insert_sibling(&mut self.tree, &self.index, request) {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.rejected("insert_sibling", &sibling_id, err)),
        };

        self.renormalize()?;
        self.metrics.record_insert();
        self.log_event(
            LogLevel::Debug,
            "sibling_inserted",
            [
                json_str("id", outcome.id.as_str()),
                json_str("parent", outcome.parent.to_string()),
                json_kv("position", json!(outcome.position)),
            ],
        );
        Ok(outcome)
    }

    /// Insert a new leaf whose id comes from `ids`.
    pub fn insert_generated(
        &mut self,
        parent: ParentRef,
        sibling_id: &str,
        placement: Placement,
        size: SizeSpec,
        take_half_of_sibling: bool,
        ids: &mut dyn IdGenerator,
    ) -> Result<InsertOutcome> {
        let id: ItemId = ids.next_id();
        self.insert_sibling(InsertRequest {
            parent,
            sibling_id: sibling_id.to_string(),
            placement,
            leaf: Leaf::new(id, size),
            take_half_of_sibling,
        })
    }

    /// Remove a pane, handing its space to a neighbor or collapsing its group.
    pub fn remove_item(&mut self, item_id: &str) -> Result<RemoveOutcome> {
        let policy = self.config.mixed_transfer;
        let outcome = match mutation::remove_item(&mut self.tree, &self.index, item_id, policy) {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.rejected("remove_item", item_id, err)),
        };

        self.renormalize()?;
        self.metrics.record_removal(outcome.collapsed_group.is_some());

        if let Some(transfer) = outcome.transfer.filter(|transfer| transfer.is_mixed()) {
            self.log_event(
                LogLevel::Warn,
                "mixed_space_transfer",
                [
                    json_str("removed", outcome.removed.id()),
                    json_str("receiver", outcome.receiver.clone().unwrap_or_default()),
                    json_str("receiver_kind", transfer.receiver_kind().as_str()),
                ],
            );
        }
        for renamed in &outcome.renamed_items {
            self.log_event(
                LogLevel::Debug,
                "group_collapsed",
                [
                    json_str("old_id", renamed.old_id.as_str()),
                    json_str("new_id", renamed.new_id.as_str()),
                ],
            );
        }
        self.log_event(
            LogLevel::Debug,
            "item_removed",
            [
                json_str("id", outcome.removed.id()),
                json_str("parent", outcome.parent.to_string()),
            ],
        );
        Ok(outcome)
    }

    fn sync_surfaces(&mut self) -> Result<()> {
        let sizing = self.config.sizing();
        let mut surfaces = Vec::new();
        for (parent, direction, items) in self.tree.sibling_lists() {
            let template = grid_template(items, &self.index, items.len() - 1, sizing)?;
            let fixed_sizes_sum = self
                .index
                .fixed_sizes_sum(&parent)
                .ok_or_else(|| LayoutError::NotFound(parent.to_string()))?;
            surfaces.push((
                parent,
                GroupSurface {
                    direction,
                    template,
                    fixed_sizes_sum,
                },
            ));
        }
        self.surfaces.sync(surfaces);
        Ok(())
    }

    fn rejected(&mut self, operation: &str, id: &str, err: LayoutError) -> LayoutError {
        self.metrics.record_rejected();
        self.log_event(
            LogLevel::Warn,
            "operation_rejected",
            [
                json_str("operation", operation),
                json_str("id", id),
                json_str("reason", err.to_string()),
            ],
        );
        err
    }

    fn log_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
