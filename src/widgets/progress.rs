use std::time::Duration;

use crate::cache::RenderCache;
use crate::render::RenderContext;
use crate::theme::{Semantic, Theme};
use crate::width::{pad_to_width, truncate_to_width};

use super::progress_bar::{BarStyle, render_progress_bar};
use super::{Memoized, Panel, format_seconds};

const NAME_COLUMNS: usize = 20;
const BAR_CELLS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoutStatus {
    Pending,
    Running,
    Complete,
    Error,
}

impl ScoutStatus {
    fn role(self) -> Semantic {
        match self {
            ScoutStatus::Pending => Semantic::Dim,
            ScoutStatus::Running => Semantic::Accent,
            ScoutStatus::Complete => Semantic::Success,
            ScoutStatus::Error => Semantic::Error,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ScoutStatus::Pending => "⏸",
            ScoutStatus::Running => "⏳",
            ScoutStatus::Complete => "✅",
            ScoutStatus::Error => "❌",
        }
    }
}

/// One parallel unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoutProgress {
    pub name: String,
    pub status: ScoutStatus,
    /// 0-100.
    pub progress: f64,
    pub duration: Option<Duration>,
    pub error: Option<String>,
}

impl ScoutProgress {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScoutStatus::Pending,
            progress: 0.0,
            duration: None,
            error: None,
        }
    }

    fn status_text(&self) -> String {
        match self.status {
            ScoutStatus::Pending => "Waiting...".to_string(),
            ScoutStatus::Running => "Running...".to_string(),
            ScoutStatus::Complete => match self.duration {
                Some(duration) if !duration.is_zero() => {
                    format!("Complete ({})", format_seconds(duration))
                }
                _ => "Complete".to_string(),
            },
            ScoutStatus::Error => match &self.error {
                Some(err) => format!("Error: {err}"),
                None => "Error".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOptions {
    pub title: String,
    pub show_estimate: bool,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            title: "Smart Work: Planning".to_string(),
            show_estimate: true,
        }
    }
}

/// Live view of parallel scouts with an average-based time estimate.
pub struct ProgressIndicator {
    scouts: Vec<ScoutProgress>,
    options: ProgressOptions,
    cache: RenderCache,
}

impl ProgressIndicator {
    /// Scouts are keyed by name; a later duplicate replaces an earlier one.
    pub fn new(scouts: Vec<ScoutProgress>, options: ProgressOptions) -> Self {
        let mut unique: Vec<ScoutProgress> = Vec::with_capacity(scouts.len());
        for scout in scouts {
            match unique.iter_mut().find(|s| s.name == scout.name) {
                Some(existing) => *existing = scout,
                None => unique.push(scout),
            }
        }
        Self {
            scouts: unique,
            options,
            cache: RenderCache::new(),
        }
    }

    pub fn scouts(&self) -> &[ScoutProgress] {
        &self.scouts
    }

    /// Apply `update` to the named scout. Returns false for unknown names.
    pub fn update_scout<F>(&mut self, name: &str, update: F) -> bool
    where
        F: FnOnce(&mut ScoutProgress),
    {
        match self.scouts.iter_mut().find(|s| s.name == name) {
            Some(scout) => {
                update(scout);
                self.cache.invalidate();
                true
            }
            None => false,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.scouts
            .iter()
            .filter(|s| s.status == ScoutStatus::Complete)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.scouts.len()
    }

    /// Mean duration of completed scouts that reported one.
    pub fn average_duration(&self) -> Option<Duration> {
        let nanos: Vec<u128> = self
            .scouts
            .iter()
            .filter(|s| s.status == ScoutStatus::Complete)
            .filter_map(|s| s.duration)
            .map(|d| d.as_nanos())
            .collect();
        if nanos.is_empty() {
            return None;
        }
        // u128 nanoseconds hold any realistic sum of Durations
        let total = nanos.iter().fold(0u128, |acc, n| acc.saturating_add(*n));
        Some(duration_from_nanos(total / nanos.len() as u128))
    }

    /// Average times the scouts still outstanding; saturates at `Duration::MAX`.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let remaining = self.total_count().saturating_sub(self.completed_count());
        if remaining == 0 {
            return None;
        }
        self.average_duration()
            .filter(|avg| !avg.is_zero())
            .map(|avg| {
                u32::try_from(remaining)
                    .ok()
                    .and_then(|count| avg.checked_mul(count))
                    .unwrap_or(Duration::MAX)
            })
    }

    fn status_message(&self, theme: &dyn Theme) -> String {
        let completed = self.completed_count();
        let total = self.total_count();
        if completed == 0 {
            theme.fg(Semantic::Dim, &format!("Spawning {total} parallel scouts..."))
        } else if completed == total {
            theme.fg(Semantic::Success, "✅ All scouts complete!")
        } else {
            theme.fg(
                Semantic::Accent,
                &format!("Processing: {completed}/{total} complete"),
            )
        }
    }

    fn scout_line(&self, scout: &ScoutProgress, theme: &dyn Theme) -> String {
        let role = scout.status.role();
        let name = truncate_to_width(&scout.name, NAME_COLUMNS, Some("…"));
        let name = pad_to_width(&name, NAME_COLUMNS);
        let bar = render_progress_bar(scout.progress, BAR_CELLS, BarStyle::filled(role), theme);
        format!(
            "{} {} [{}] {}",
            theme.fg(role, scout.status.icon()),
            name,
            bar,
            theme.fg(role, &scout.status_text())
        )
    }

    fn summary_line(&self, theme: &dyn Theme) -> String {
        let mut parts = vec![format!(
            "{}/{} complete",
            self.completed_count(),
            self.total_count()
        )];
        if let Some(avg) = self.average_duration().filter(|d| !d.is_zero()) {
            parts.push(format!("Avg: {}", format_seconds(avg)));
        }
        if let Some(est) = self.estimated_remaining() {
            parts.push(format!("Est. remaining: {}", format_seconds(est)));
        }
        parts
            .iter()
            .map(|part| theme.fg(Semantic::Dim, part))
            .collect::<Vec<_>>()
            .join(&theme.fg(Semantic::Dim, " • "))
    }
}

impl Panel for ProgressIndicator {
    fn name(&self) -> &str {
        "ProgressIndicator"
    }

    fn render(&mut self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        self.render_cached(width, ctx)
    }

    fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

impl Memoized for ProgressIndicator {
    fn cache(&mut self) -> &mut RenderCache {
        &mut self.cache
    }

    fn compose(&self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let mut writer = ctx.writer(self.name(), width);
        writer
            .top(&self.options.title)
            .blank()
            .line(&self.status_message(theme))
            .blank();
        for scout in &self.scouts {
            writer.line(&self.scout_line(scout, theme));
        }
        writer.blank();
        if self.options.show_estimate && self.completed_count() > 0 {
            writer.line(&self.summary_line(theme)).blank();
        }
        writer.bottom();
        writer.finish()
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}
