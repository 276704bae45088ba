//! Width-exact bordered panels for the Dex terminal dashboard.
//!
//! Every line a widget emits measures exactly the width it was asked for.
//! Measurement ignores SGR style sequences, the composer pads or clips to the
//! requested width, and a [`WidthGuard`] reports any line that slips through.

pub mod cache;
pub mod config;
pub mod error;
pub mod guard;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod widgets;
pub mod width;

pub use cache::{RenderCache, context_fingerprint};
pub use config::{ConfigError, GuardConfig};
pub use error::{PanelError, Result};
pub use guard::{WidthGuard, WidthViolation, validate_line_width};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, StderrSink,
};
pub use metrics::GuardMetrics;
pub use render::{
    BorderGlyphs, Frame, Margin, PanelWriter, RenderContext, calculate_border_fill,
    render_bottom_border, render_content_line, render_empty_line, render_top_border,
};
pub use terminal::{terminal_width, terminal_width_or_default};
pub use theme::{AnsiTheme, PlainTheme, Semantic, Theme};
pub use widgets::{
    BoardAction, CareerReadiness, CareerReadinessGauge, DashboardData, DashboardWidget, Panel,
    ProgressIndicator, ProgressOptions, ScoutProgress, ScoutStatus, Task, TaskBoard, TaskColumn,
    WeekProgress, WeekProgressBar, render_progress_bar,
};
pub use width::{
    WidthMode, display_width, pad_to_width, strip_styles, truncate_to_width, visible_width,
};
