use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

pub const METRICS_TARGET: &str = "dex::panels.metrics";

/// Counters kept by a [`WidthGuard`](crate::guard::WidthGuard).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GuardMetrics {
    pub checks: u64,
    pub violations: u64,
    pub overflows: u64,
    pub underflows: u64,
    pub failed_writes: u64,
}

impl GuardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_check(&mut self) {
        self.checks = self.checks.saturating_add(1);
    }

    pub fn record_violation(&mut self, excess: i64) {
        self.violations = self.violations.saturating_add(1);
        if excess > 0 {
            self.overflows = self.overflows.saturating_add(1);
        } else {
            self.underflows = self.underflows.saturating_add(1);
        }
    }

    pub fn record_failed_write(&mut self) {
        self.failed_writes = self.failed_writes.saturating_add(1);
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("checks".to_string(), json!(self.checks));
        map.insert("violations".to_string(), json!(self.violations));
        map.insert("overflows".to_string(), json!(self.overflows));
        map.insert("underflows".to_string(), json!(self.underflows));
        map.insert("failed_writes".to_string(), json!(self.failed_writes));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "width_guard_metrics", self.as_fields())
    }
}
