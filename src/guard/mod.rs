//! Width-violation detector.
//!
//! Strictly observational: a check measures a finished line, reports any
//! mismatch through the configured sinks and hands the line back untouched.
//! Sink failures are counted and dropped so a broken log never breaks a
//! render.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde_json::json;

use crate::config::{ConfigError, GuardConfig};
use crate::logging::{
    FileSink, LogEvent, LogLevel, Logger, StderrSink, event_with_fields, json_kv,
};
use crate::metrics::{GuardMetrics, METRICS_TARGET};
use crate::width::{WidthMode, strip_styles};

pub const WIDTH_TARGET: &str = "dex::panels.width";
const EXCERPT_CHARS: usize = 100;

/// A line whose measured width differs from the width it was rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthViolation {
    pub component: String,
    pub context: String,
    pub expected: usize,
    pub actual: usize,
    /// `actual - expected`; negative when the line came up short.
    pub excess: i64,
    /// First characters of the raw line, escapes included.
    pub excerpt: String,
}

impl WidthViolation {
    pub fn is_overflow(&self) -> bool {
        self.excess > 0
    }

    /// `plain` is the excerpt minus style sequences, i.e. exactly what was
    /// counted; `rendered` drops every escape, as a terminal would show it.
    pub fn to_log_event(&self) -> LogEvent {
        let plain = strip_styles(&self.excerpt).into_owned();
        let rendered =
            String::from_utf8_lossy(&strip_ansi_escapes::strip(&self.excerpt)).into_owned();
        event_with_fields(
            if self.is_overflow() {
                LogLevel::Error
            } else {
                LogLevel::Warn
            },
            WIDTH_TARGET,
            &self.to_string(),
            [
                json_kv("component", json!(self.component)),
                json_kv("context", json!(self.context)),
                json_kv("expected", json!(self.expected)),
                json_kv("actual", json!(self.actual)),
                json_kv("excess", json!(self.excess)),
                json_kv("raw", json!(self.excerpt)),
                json_kv("plain", json!(plain)),
                json_kv("rendered", json!(rendered)),
            ],
        )
    }
}

impl fmt::Display for WidthViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] TUI width violation in {}: expected {} columns, rendered {} ({:+})",
            self.component, self.context, self.expected, self.actual, self.excess
        )
    }
}

pub struct WidthGuard {
    enabled: bool,
    mode: WidthMode,
    logger: Logger,
    metrics: Mutex<GuardMetrics>,
}

impl WidthGuard {
    pub fn new(config: &GuardConfig) -> Self {
        let mut logger = Logger::empty();
        if config.echo_stderr {
            logger = logger.with_sink(StderrSink);
        }
        if let Some(path) = &config.log_path {
            logger = logger.with_sink(FileSink::new(path));
        }
        Self {
            enabled: config.enabled,
            mode: config.width_mode,
            logger,
            metrics: Mutex::new(GuardMetrics::new()),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(&GuardConfig::from_env()?))
    }

    /// Enabled guard reporting to a caller-built logger.
    pub fn with_logger(logger: Logger) -> Self {
        Self {
            enabled: true,
            mode: WidthMode::default(),
            logger,
            metrics: Mutex::new(GuardMetrics::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(&GuardConfig::disabled())
    }

    pub fn with_mode(mut self, mode: WidthMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> WidthMode {
        self.mode
    }

    pub fn check(
        &self,
        line: &str,
        width: usize,
        component: &str,
        context: &str,
    ) -> Option<WidthViolation> {
        self.check_with(line, width, component, context, self.mode)
    }

    /// Measure `line` with `mode` and report it if it is not exactly `width`.
    pub fn check_with(
        &self,
        line: &str,
        width: usize,
        component: &str,
        context: &str,
        mode: WidthMode,
    ) -> Option<WidthViolation> {
        if !self.enabled {
            return None;
        }
        self.lock_metrics().record_check();

        let actual = mode.measure(line);
        if actual == width {
            return None;
        }

        let violation = WidthViolation {
            component: component.to_string(),
            context: context.to_string(),
            expected: width,
            actual,
            excess: actual as i64 - width as i64,
            excerpt: line.chars().take(EXCERPT_CHARS).collect(),
        };

        let delivered = self.logger.log_event(violation.to_log_event());
        let mut metrics = self.lock_metrics();
        metrics.record_violation(violation.excess);
        if delivered.is_err() {
            metrics.record_failed_write();
        }
        Some(violation)
    }

    pub fn metrics(&self) -> GuardMetrics {
        *self.lock_metrics()
    }

    /// Log the current counters; failures are counted like any other write.
    pub fn emit_metrics(&self) {
        let event = self.metrics().to_log_event(METRICS_TARGET);
        if self.logger.log_event(event).is_err() {
            self.lock_metrics().record_failed_write();
        }
    }

    fn lock_metrics(&self) -> MutexGuard<'_, GuardMetrics> {
        self.metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for WidthGuard {
    fn default() -> Self {
        Self::new(&GuardConfig::default())
    }
}

/// One-shot check with the default guard (stderr + home log file).
pub fn validate_line_width(
    line: &str,
    width: usize,
    component: &str,
    context: &str,
) -> Option<WidthViolation> {
    WidthGuard::default().check(line, width, component, context)
}
