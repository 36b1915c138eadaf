use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Operation counters for one distribution session.
#[derive(Debug, Default, Clone)]
pub struct EngineMetrics {
    normalizations: u64,
    drags: u64,
    inserts: u64,
    removals: u64,
    collapses: u64,
    rejected: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_normalization(&mut self) {
        self.normalizations = self.normalizations.saturating_add(1);
    }

    pub fn record_drag(&mut self) {
        self.drags = self.drags.saturating_add(1);
    }

    pub fn record_insert(&mut self) {
        self.inserts = self.inserts.saturating_add(1);
    }

    pub fn record_removal(&mut self, collapsed: bool) {
        self.removals = self.removals.saturating_add(1);
        if collapsed {
            self.collapses = self.collapses.saturating_add(1);
        }
    }

    pub fn record_rejected(&mut self) {
        self.rejected = self.rejected.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            normalizations: self.normalizations,
            drags: self.drags,
            inserts: self.inserts,
            removals: self.removals,
            collapses: self.collapses,
            rejected: self.rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub normalizations: u64,
    pub drags: u64,
    pub inserts: u64,
    pub removals: u64,
    pub collapses: u64,
    pub rejected: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "distribution_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("normalizations".to_string(), json!(self.normalizations));
        map.insert("drags".to_string(), json!(self.drags));
        map.insert("inserts".to_string(), json!(self.inserts));
        map.insert("removals".to_string(), json!(self.removals));
        map.insert("collapses".to_string(), json!(self.collapses));
        map.insert("rejected".to_string(), json!(self.rejected));
        map
    }
}
