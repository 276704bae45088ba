//! Dashboard widgets built on the panel composer.
//!
//! Each widget owns a [`RenderCache`] and renders through a
//! [`PanelWriter`](crate::render::PanelWriter), so every line it emits has
//! been through the width guard once per cache miss.

mod board;
mod career;
mod dashboard;
mod progress;
mod progress_bar;
mod week;

pub use board::{BoardAction, Priority, Task, TaskBoard, TaskColumn, TaskStatus};
pub use career::{
    CareerReadiness, CareerReadinessGauge, CompetencyProgress, CompetencyStatus, GapAnalysis,
    ReadinessStatus,
};
pub use dashboard::{DashboardData, DashboardWidget, TopTask, WeekPriority, format_hours};
pub use progress::{ProgressIndicator, ProgressOptions, ScoutProgress, ScoutStatus};
pub use progress_bar::{BarStyle, EMPTY_CELL, FILLED_CELL, render_progress_bar};
pub use week::{PriorityProgress, PriorityStatus, WeekProgress, WeekProgressBar};

use std::time::Duration;

use crate::cache::{RenderCache, context_fingerprint};
use crate::render::RenderContext;

/// A bordered widget that renders to exactly `width` columns per line.
pub trait Panel {
    fn name(&self) -> &str;

    fn render(&mut self, width: usize, ctx: &RenderContext<'_>) -> Vec<String>;

    /// Drop memoized output; the next render recomposes.
    fn invalidate(&mut self);
}

/// Width + context memoization shared by the widgets.
pub(crate) trait Memoized {
    fn cache(&mut self) -> &mut RenderCache;

    fn compose(&self, width: usize, ctx: &RenderContext<'_>) -> Vec<String>;

    fn render_cached(&mut self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let fingerprint = context_fingerprint(ctx);
        if let Some(lines) = self.cache().get(width, &fingerprint) {
            return lines.to_vec();
        }
        let lines = self.compose(width, ctx);
        self.cache().store(width, fingerprint, lines.clone());
        lines
    }
}

pub(crate) fn format_seconds(duration: Duration) -> String {
    format!("{:.1}s", duration.as_secs_f64())
}
