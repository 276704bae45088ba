use blake3::Hash;

use crate::cache::{RenderCache, context_fingerprint};
use crate::render::{Margin, RenderContext};
use crate::theme::{Semantic, Theme};
use crate::width::pad_to_width;

use super::progress_bar::{BarStyle, render_progress_bar};
use super::{Memoized, Panel};

const WORK_DAYS: u8 = 5;
const LABEL_COLUMNS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityStatus {
    OnTrack,
    Behind,
    NotStarted,
}

impl PriorityStatus {
    fn role(self) -> Semantic {
        match self {
            PriorityStatus::OnTrack => Semantic::Success,
            PriorityStatus::Behind => Semantic::Warning,
            PriorityStatus::NotStarted => Semantic::Error,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            PriorityStatus::OnTrack => "✅",
            PriorityStatus::Behind => "⚠️",
            PriorityStatus::NotStarted => "❗",
        }
    }

    fn needs_attention(self) -> bool {
        !matches!(self, PriorityStatus::OnTrack)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriorityProgress {
    /// "Priority 1", "Priority 2", ...
    pub name: String,
    pub progress: f64,
    pub status: PriorityStatus,
}

impl PriorityProgress {
    fn short_name(&self) -> String {
        self.name.replace("Priority ", "P")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekProgress {
    /// 1 (Monday) through 5 (Friday).
    pub day_of_week: u8,
    pub priorities: Vec<PriorityProgress>,
}

impl WeekProgress {
    pub fn average_progress(&self) -> f64 {
        if self.priorities.is_empty() {
            return 0.0;
        }
        let total: f64 = self.priorities.iter().map(|p| p.progress).sum();
        total / self.priorities.len() as f64
    }
}

/// Week-at-a-glance: a one-line footer form and a bordered panel form.
pub struct WeekProgressBar {
    progress: WeekProgress,
    compact: Option<(Hash, String)>,
    cache: RenderCache,
}

impl WeekProgressBar {
    pub fn new(progress: WeekProgress) -> Self {
        Self {
            progress,
            compact: None,
            cache: RenderCache::new(),
        }
    }

    pub fn progress(&self) -> &WeekProgress {
        &self.progress
    }

    pub fn update(&mut self, progress: WeekProgress) {
        self.progress = progress;
        self.invalidate();
    }

    /// `Day 3/5 [▓▓▓░░] ⚠️ P2,P3`
    pub fn render_compact(&mut self, ctx: &RenderContext<'_>) -> String {
        let fingerprint = context_fingerprint(ctx);
        if let Some((cached, line)) = &self.compact {
            if *cached == fingerprint {
                return line.clone();
            }
        }

        let theme = ctx.theme;
        let mut parts = vec![
            theme.fg(
                Semantic::Text,
                &format!("Day {}/{}", self.progress.day_of_week, WORK_DAYS),
            ),
            format!(
                "[{}]",
                render_progress_bar(
                    self.progress.average_progress(),
                    WORK_DAYS as usize,
                    BarStyle::default(),
                    theme
                )
            ),
        ];

        let warnings: Vec<String> = self
            .progress
            .priorities
            .iter()
            .filter(|p| p.status.needs_attention())
            .map(PriorityProgress::short_name)
            .collect();
        if !warnings.is_empty() {
            parts.push(theme.fg(Semantic::Warning, &format!("⚠️ {}", warnings.join(","))));
        }

        let line = parts.join(" ");
        self.compact = Some((fingerprint, line.clone()));
        line
    }

    fn priority_line(&self, priority: &PriorityProgress, theme: &dyn Theme) -> String {
        let role = priority.status.role();
        let bar = render_progress_bar(priority.progress, 10, BarStyle::filled(role), theme);
        format!(
            "{} [{}] {}% {}",
            pad_to_width(&priority.name, LABEL_COLUMNS),
            bar,
            priority.progress.clamp(0.0, 100.0).round() as u32,
            theme.fg(role, priority.status.icon())
        )
    }
}

impl Memoized for WeekProgressBar {
    fn cache(&mut self) -> &mut RenderCache {
        &mut self.cache
    }

    fn compose(&self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let title = theme.fg(Semantic::Accent, &theme.bold("Week Progress"));
        let mut writer = ctx.writer(self.name(), width);
        writer
            .top(&title)
            .line_with(
                &format!("Day {}/{}", self.progress.day_of_week, WORK_DAYS),
                Margin::Single,
            )
            .blank();
        for priority in &self.progress.priorities {
            writer.line_with(&self.priority_line(priority, theme), Margin::Single);
        }
        writer.bottom();
        writer.finish()
    }
}

impl Panel for WeekProgressBar {
    fn name(&self) -> &str {
        "WeekProgressBar"
    }

    fn render(&mut self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        self.render_cached(width, ctx)
    }

    fn invalidate(&mut self) {
        self.compact = None;
        self.cache.invalidate();
    }
}
