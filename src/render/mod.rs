//! Border/line composer and the per-render context handed to widgets.

mod core;
mod writer;

pub use self::core::{
    BorderGlyphs, Frame, Margin, TITLE_OVERHEAD, calculate_border_fill, render_bottom_border,
    render_content_line, render_empty_line, render_top_border,
};
pub use writer::PanelWriter;

use crate::guard::WidthGuard;
use crate::theme::Theme;

/// Everything a widget needs for one render pass.
///
/// The theme is supplied by the host per call; nothing here is global.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a dyn Theme,
    pub guard: &'a WidthGuard,
    pub frame: Frame,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a dyn Theme, guard: &'a WidthGuard) -> Self {
        Self {
            theme,
            guard,
            frame: Frame::default(),
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Start a guarded panel for `component` at `width`.
    pub fn writer<'w>(&self, component: &'w str, width: usize) -> PanelWriter<'w>
    where
        'a: 'w,
    {
        PanelWriter::new(*self, component, width)
    }
}
