use crate::cache::RenderCache;
use crate::render::{Margin, RenderContext};
use crate::theme::{Semantic, Theme};
use crate::width::pad_to_width;

use super::progress_bar::{BarStyle, render_progress_bar};
use super::{Memoized, Panel};

const ACTIONS: &str = "[View Evidence] [Capture New Evidence] [Export Assessment]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessStatus {
    NotReady,
    Building,
    NearlyReady,
    Ready,
}

impl ReadinessStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReadinessStatus::NotReady => "Not Ready",
            ReadinessStatus::Building => "Building",
            ReadinessStatus::NearlyReady => "Nearly Ready",
            ReadinessStatus::Ready => "Ready",
        }
    }

    fn role(self) -> Semantic {
        match self {
            ReadinessStatus::NotReady => Semantic::Error,
            ReadinessStatus::Building => Semantic::Warning,
            ReadinessStatus::NearlyReady => Semantic::Accent,
            ReadinessStatus::Ready => Semantic::Success,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompetencyStatus {
    Weak,
    Building,
    OnTrack,
    Strong,
    Excellent,
}

impl CompetencyStatus {
    fn role(self) -> Semantic {
        match self {
            CompetencyStatus::Weak => Semantic::Error,
            CompetencyStatus::Building => Semantic::Warning,
            CompetencyStatus::OnTrack => Semantic::Accent,
            CompetencyStatus::Strong | CompetencyStatus::Excellent => Semantic::Success,
        }
    }

    fn badge(self) -> &'static str {
        match self {
            CompetencyStatus::Weak => "⚠️ Needs more evidence",
            CompetencyStatus::Building => "🔄 Building",
            CompetencyStatus::OnTrack => "✅ On track",
            CompetencyStatus::Strong => "✅ Strong",
            CompetencyStatus::Excellent => "✅ Excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompetencyProgress {
    pub name: String,
    /// 0-100.
    pub score: f64,
    pub status: CompetencyStatus,
    pub evidence_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapAnalysis {
    pub competency: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CareerReadiness {
    pub overall_score: f64,
    pub status: ReadinessStatus,
    pub competencies: Vec<CompetencyProgress>,
    pub gaps: Vec<GapAnalysis>,
    /// e.g. "IC4"
    pub current_level: Option<String>,
    /// e.g. "IC5"
    pub target_level: Option<String>,
}

impl CareerReadiness {
    pub fn title(&self) -> String {
        match (&self.current_level, &self.target_level) {
            (Some(current), Some(target)) => {
                format!("Promotion Readiness: {current} → {target}")
            }
            _ => "Promotion Readiness".to_string(),
        }
    }
}

/// Promotion readiness with per-competency bars and a gap list.
pub struct CareerReadinessGauge {
    readiness: CareerReadiness,
    cache: RenderCache,
}

impl CareerReadinessGauge {
    pub fn new(readiness: CareerReadiness) -> Self {
        Self {
            readiness,
            cache: RenderCache::new(),
        }
    }

    pub fn readiness(&self) -> &CareerReadiness {
        &self.readiness
    }

    pub fn update(&mut self, readiness: CareerReadiness) {
        self.readiness = readiness;
        self.cache.invalidate();
    }

    fn heading(theme: &dyn Theme, label: &str) -> String {
        theme.fg(Semantic::Accent, &theme.bold(&format!("─── {label} ───")))
    }

    fn score_line(&self, theme: &dyn Theme) -> String {
        let score = self.readiness.overall_score.clamp(0.0, 100.0).round() as u32;
        let bar = render_progress_bar(
            self.readiness.overall_score,
            20,
            BarStyle::filled(self.readiness.status.role()),
            theme,
        );
        format!("Overall: {score}/100    [{bar}] {score}%")
    }

    fn competency_line(comp: &CompetencyProgress, theme: &dyn Theme) -> String {
        let role = comp.status.role();
        let bar = render_progress_bar(comp.score, 10, BarStyle::filled(role), theme);
        let score = comp.score.clamp(0.0, 100.0).round() as u32;
        format!(
            "{} [{}] {:>3}%   {}",
            pad_to_width(&comp.name, 18),
            bar,
            score,
            theme.fg(role, comp.status.badge())
        )
    }
}

impl Memoized for CareerReadinessGauge {
    fn cache(&mut self) -> &mut RenderCache {
        &mut self.cache
    }

    fn compose(&self, width: usize, ctx: &RenderContext<'_>) -> Vec<String> {
        let theme = ctx.theme;
        let readiness = &self.readiness;
        let status = readiness.status;

        let mut writer = ctx.writer(self.name(), width);
        writer
            .top(&readiness.title())
            .blank()
            .line_with(&self.score_line(theme), Margin::Single)
            .line_with(
                &theme.fg(status.role(), &format!("Status: {}", status.label())),
                Margin::Single,
            )
            .blank()
            .line_with(&Self::heading(theme, "Competency Breakdown"), Margin::Single)
            .blank();
        for comp in &readiness.competencies {
            writer.line_with(&Self::competency_line(comp, theme), Margin::Single);
        }
        writer.blank();

        if !readiness.gaps.is_empty() {
            writer
                .line_with(&Self::heading(theme, "Gap Analysis"), Margin::Single)
                .blank()
                .line_with(&theme.fg(Semantic::Text, "Focus Areas:"), Margin::Single);
            for (index, gap) in readiness.gaps.iter().enumerate() {
                let item = format!(
                    "  {}. {} - {}",
                    index + 1,
                    gap.competency,
                    gap.recommendation
                );
                writer.line_with(&theme.fg(Semantic::Text, &item), Margin::Single);
            }
            writer.blank();
        }

        writer.hint(ACTIONS).bottom();
        writer.finish()
    }
}

impl Panel for CareerReadinessGauge {
    fn name(&self) -> &str {
        "CareerReadinessGauge"
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

    fn readiness() -> CareerReadiness {
        CareerReadiness {
            overall_score: 72.0,
            status: ReadinessStatus::NearlyReady,
            competencies: vec![
                CompetencyProgress {
                    name: "Technical Depth".to_string(),
                    score: 80.0,
                    status: CompetencyStatus::Strong,
                    evidence_count: 12,
                },
                CompetencyProgress {
                    name: "Cross-team Influence".to_string(),
                    score: 35.0,
                    status: CompetencyStatus::Weak,
                    evidence_count: 2,
                },
            ],
            gaps: vec![GapAnalysis {
                competency: "Cross-team Influence".to_string(),
                recommendation: "Lead one cross-org design review this quarter".to_string(),
            }],
            current_level: Some("IC4".to_string()),
            target_level: Some("IC5".to_string()),
        }
    }

    #[test]
    fn title_includes_levels_when_known() {
        assert_eq!(readiness().title(), "Promotion Readiness: IC4 → IC5");
        let mut bare = readiness();
        bare.target_level = None;
        assert_eq!(bare.title(), "Promotion Readiness");
    }

    #[test]
    fn gauge_is_exact_at_every_width() {
        let sink = MemorySink::new();
        let guard = WidthGuard::with_logger(Logger::new(sink.clone()));
        let theme = AnsiTheme::new();
        let ctx = RenderContext::new(&theme, &guard);
        let mut gauge = CareerReadinessGauge::new(readiness());

        for width in [10, 40, 72, 160] {
            let lines = gauge.render(width, &ctx);
            assert!(lines.iter().all(|l| visible_width(l) == width), "width {width}");
        }
        assert!(sink.events().is_empty());
    }

    #[test]
    fn gauge_sections() {
        let guard = WidthGuard::disabled();
        let ctx = RenderContext::new(&PlainTheme, &guard);
        let mut gauge = CareerReadinessGauge::new(readiness());
        let lines = gauge.render(100, &ctx);

        assert!(lines[0].starts_with("┌─ Promotion Readiness: IC4 → IC5 ─"));
        assert!(lines.iter().any(|l| l.contains("Overall: 72/100")));
        assert!(lines.iter().any(|l| l.contains("Status: Nearly Ready")));
        assert!(lines.iter().any(|l| l.contains("Technical Depth    [▓▓▓▓▓▓▓▓░░]  80%")));
        assert!(lines.iter().any(|l| l.contains("1. Cross-team Influence - Lead one")));
        assert!(lines[lines.len() - 2].contains("[View Evidence]"));
    }

    #[test]
    fn gap_section_is_optional() {
        let guard = WidthGuard::disabled();
        let ctx = RenderContext::new(&PlainTheme, &guard);
        let mut data = readiness();
        data.gaps.clear();
        let mut gauge = CareerReadinessGauge::new(data);
        let lines = gauge.render(80, &ctx);
        assert!(!lines.iter().any(|l| l.contains("Gap Analysis")));
    }
}
