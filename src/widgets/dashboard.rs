use crate::cache::RenderCache;
use crate::render::{Margin, RenderContext};
use crate::theme::{Semantic, Theme};
use crate::width::{pad_to_width, truncate_to_width};

use super::board::Priority;
use super::{Memoized, Panel};

const LEFT_COLUMNS: usize = 27;
const GAP_COLUMNS: usize = 2;
const LEAD_COLUMNS: usize = 2;
const MAX_ROWS: usize = 3;
const LEFT_HEADER: &str = "Week Priorities";
const RIGHT_HEADER: &str = "Top Tasks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekPriority {
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopTask {
    pub text: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// Only the first three are shown.
    pub week_priorities: Vec<WeekPriority>,
    /// Only the first three are shown.
    pub top_tasks: Vec<TopTask>,
    /// Free hours left today.
    pub focus_hours: f64,
}

/// Human-readable focus time: `None (meetings fully booked)`, `45 minutes`,
/// `1 hour`, `3 hours` or `2h 30m`.
pub fn format_hours(hours: f64) -> String {
    if hours.is_nan() || hours <= 0.0 {
        return "None (meetings fully booked)".to_string();
    }
    let total_minutes = (hours * 60.0).round() as u64;
    if hours < 1.0 && total_minutes < 60 {
        return format!("{total_minutes} minutes");
    }
    match (total_minutes / 60, total_minutes % 60) {
        (1, 0) => "1 hour".to_string(),
        (whole, 0) => format!("{whole} hours"),
        (whole, minutes) => format!("{whole}h {minutes}m"),
    }
}

fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::P0 => "🔥",
        Priority::P1 => "⚡",
        Priority::P2 => "○",
    }
}

/// Day-at-a-glance: week priorities beside top tasks, then focus time.
pub struct DashboardWidget {
    data: DashboardData,
    cache: RenderCache,
}

impl DashboardWidget {
    pub fn new(data: DashboardData) -> Self {
        Self {
            data,
            cache: RenderCache::new(),
        }
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn update(&mut self, data: DashboardData) {
        self.data = data;
        self.cache.invalidate();
    }

    fn cell(text: &str, columns: usize, ellipsis: Option<&str>) -> String {
        pad_to_width(&truncate_to_width(text, columns, ellipsis), columns)
    }

    fn two_columns(
        left: &str,
        right: &str,
        right_columns: usize,
        ellipsis: Option<&str>,
        style: impl Fn(String) -> String,
    ) -> String {
        format!(
            "{}{}{}{}",
            " ".repeat(LEAD_COLUMNS),
            style(Self::cell(left, LEFT_COLUMNS, ellipsis)),
            " ".repeat(GAP_COLUMNS),
            style(Self::cell(right, right_columns, ellipsis)),
        )
    }

    fn priority_text(item: Option<&WeekPriority>) -> String {
        item.map(|p| format!("{} {}", if p.completed { "☑" } else { "□" }, p.text))
            .unwrap_or_default()
    }

    fn task_text(item: Option<&TopTask>) -> String {
        item.map(|t| format!("{} {}", priority_icon(t.priority), t.text))
            .unwrap_or_default()
    }
}

impl Memoized for DashboardWidget {
    fn cache(&mut self) -> &mut RenderCache {
        &mut self.cache
    }

    fn compose(&self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme: &dyn Theme = ctx.theme;
        let mut writer = ctx.writer(self.name(), width);
        let inner = writer.inner_width(Margin::None);
        let right_columns = inner.saturating_sub(LEAD_COLUMNS + LEFT_COLUMNS + GAP_COLUMNS);

        let heading = |text: String| theme.fg(Semantic::Accent, &theme.bold(&text));
        let underline = |text: String| theme.fg(Semantic::Dim, &text);
        writer
            .rule()
            .blank()
            .line_with(
                &Self::two_columns(LEFT_HEADER, RIGHT_HEADER, right_columns, None, heading),
                Margin::None,
            )
            .line_with(
                &Self::two_columns(
                    &"─".repeat(LEFT_HEADER.len()),
                    &"─".repeat(RIGHT_HEADER.len()),
                    right_columns,
                    None,
                    underline,
                ),
                Margin::None,
            );

        for row in 0..MAX_ROWS {
            let left = Self::priority_text(self.data.week_priorities.get(row));
            let right = Self::task_text(self.data.top_tasks.get(row));
            let line = Self::two_columns(&left, &right, right_columns, Some("..."), |cell| {
                theme.fg(Semantic::Text, &cell)
            });
            writer.line_with(&line, Margin::None);
        }

        let focus = format!(
            "  📅 Focus Time Available: {}",
            format_hours(self.data.focus_hours)
        );
        writer
            .blank()
            .line_with(&theme.fg(Semantic::Text, &focus), Margin::None)
            .blank()
            .bottom();
        writer.finish()
    }
}

impl Panel for DashboardWidget {
    fn name(&self) -> &str {
        "DashboardWidget"
    }

    fn render(&mut self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        self.render_cached(width, ctx)
    }

    fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::WidthGuard;
    use crate::logging::{Logger, MemorySink};
    use crate::theme::{AnsiTheme, PlainTheme};
    use crate::width::visible_width;

    fn data() -> DashboardData {
        DashboardData {
            week_priorities: vec![
                WeekPriority {
                    text: "Ship Q3 planning doc".to_string(),
                    completed: true,
                },
                WeekPriority {
                    text: "Close out the hiring loop for the platform team".to_string(),
                    completed: false,
                },
            ],
            top_tasks: vec![
                TopTask {
                    text: "Review vault sync PR".to_string(),
                    priority: Priority::P0,
                },
                TopTask {
                    text: "Prep 1:1 notes".to_string(),
                    priority: Priority::P1,
                },
                TopTask {
                    text: "Tidy inbox".to_string(),
                    priority: Priority::P2,
                },
                TopTask {
                    text: "never shown".to_string(),
                    priority: Priority::P2,
                },
            ],
            focus_hours: 2.5,
        }
    }

    #[test]
    fn hours_formatting() {
        assert_eq!(format_hours(0.0), "None (meetings fully booked)");
        assert_eq!(format_hours(-1.0), "None (meetings fully booked)");
        assert_eq!(format_hours(f64::NAN), "None (meetings fully booked)");
        assert_eq!(format_hours(0.75), "45 minutes");
        assert_eq!(format_hours(1.0), "1 hour");
        assert_eq!(format_hours(3.0), "3 hours");
        assert_eq!(format_hours(2.5), "2h 30m");
    }

    #[test]
    fn minute_rounding_carries_into_hours() {
        assert_eq!(format_hours(0.999), "1 hour");
        assert_eq!(format_hours(1.999), "2 hours");
    }

    #[test]
    fn dashboard_layout() {
        let guard = WidthGuard::disabled();
        let ctx = RenderContext::new(&PlainTheme, &guard);
        let mut dashboard = DashboardWidget::new(data());
        let lines = dashboard.render(60, &ctx);

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], format!("┌{}┐", "─".repeat(58)));
        // two lead spaces, 27-column left cell, 2-column gap, 27-column right cell
        assert_eq!(
            lines[2],
            format!(
                "│  {}  {}│",
                pad_to_width("Week Priorities", 27),
                pad_to_width("Top Tasks", 27)
            )
        );
        assert!(lines[4].starts_with("│  ☑ Ship Q3 planning doc"));
        assert!(lines[4].contains("🔥 Review vault sync PR"));
        assert!(lines[5].starts_with("│  □ Close out the hiring l...  ⚡ Prep 1:1 notes"));
        assert!(lines[6].starts_with(&format!("│  {}  ○ Tidy inbox", " ".repeat(27))));
        assert!(!lines.iter().any(|l| l.contains("never shown")));
        assert!(lines[8].contains("📅 Focus Time Available: 2h 30m"));
        assert_eq!(lines[10], format!("└{}┘", "─".repeat(58)));
    }

    #[test]
    fn dashboard_is_exact_at_every_width() {
        let sink = MemorySink::new();
        let guard = WidthGuard::with_logger(Logger::new(sink.clone()));
        let theme = AnsiTheme::new();
        let ctx = RenderContext::new(&theme, &guard);
        let mut dashboard = DashboardWidget::new(data());

        for width in 0..=100 {
            let lines = dashboard.render(width, &ctx);
            assert!(lines.iter().all(|l| visible_width(l) == width), "width {width}");
        }
        assert!(sink.events().is_empty());
    }

    #[test]
    fn update_rerenders_focus_time() {
        let guard = WidthGuard::disabled();
        let ctx = RenderContext::new(&PlainTheme, &guard);
        let mut dashboard = DashboardWidget::new(data());
        dashboard.render(70, &ctx);

        let mut next = data();
        next.focus_hours = 0.0;
        dashboard.update(next);
        assert!(dashboard.render(70, &ctx)[8].contains("None (meetings fully booked)"));
    }
}
