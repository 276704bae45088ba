use crate::theme::Semantic;
use crate::width::truncate_to_width_with;

use super::RenderContext;
use super::core::{Margin, TITLE_OVERHEAD};

/// Accumulates the lines of one panel, guarding each as it is pushed.
pub struct PanelWriter<'a> {
    ctx: RenderContext<'a>,
    component: &'a str,
    width: usize,
    lines: Vec<String>,
}

impl<'a> PanelWriter<'a> {
    pub fn new(ctx: RenderContext<'a>, component: &'a str, width: usize) -> Self {
        Self {
            ctx,
            component,
            width,
            lines: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Content columns available under `margin`.
    pub fn inner_width(&self, margin: Margin) -> usize {
        margin.inner_width(self.width)
    }

    /// Top border. The title is shortened with `…` to leave room for the frame.
    pub fn top(&mut self, title: &str) -> &mut Self {
        let budget = self.width.saturating_sub(TITLE_OVERHEAD + 1);
        let title = truncate_to_width_with(title, budget, Some("…"), self.ctx.frame.mode);
        let line = self.ctx.frame.top(&title, self.width, self.ctx.theme);
        self.push(line, "top border")
    }

    /// Top border without a title.
    pub fn rule(&mut self) -> &mut Self {
        let line = self.ctx.frame.rule(self.width, self.ctx.theme);
        self.push(line, "top border")
    }

    pub fn section(&mut self, label: &str) -> &mut Self {
        let budget = self.width.saturating_sub(TITLE_OVERHEAD + 1);
        let label = truncate_to_width_with(label, budget, Some("…"), self.ctx.frame.mode);
        let line = self.ctx.frame.section(&label, self.width, self.ctx.theme);
        self.push(line, "section")
    }

    pub fn blank(&mut self) -> &mut Self {
        let line = self.ctx.frame.empty(self.width, self.ctx.theme);
        self.push(line, "empty line")
    }

    /// Content line with the default two-space margin.
    pub fn line(&mut self, content: &str) -> &mut Self {
        self.line_with(content, Margin::Double)
    }

    pub fn line_with(&mut self, content: &str, margin: Margin) -> &mut Self {
        let inner = margin.inner_width(self.width);
        let content = truncate_to_width_with(content, inner, Some("…"), self.ctx.frame.mode);
        let line = self
            .ctx
            .frame
            .content(&content, self.width, margin, self.ctx.theme);
        self.push(line, "content line")
    }

    /// Dimmed content line.
    pub fn hint(&mut self, content: &str) -> &mut Self {
        let styled = self.ctx.theme.fg(Semantic::Dim, content);
        self.line_with(&styled, Margin::Single)
    }

    /// Push a line assembled by the caller. It is checked, not corrected.
    pub fn raw(&mut self, line: String, context: &str) -> &mut Self {
        self.push(line, context)
    }

    pub fn bottom(&mut self) -> &mut Self {
        let line = self.ctx.frame.bottom(self.width, self.ctx.theme);
        self.push(line, "bottom border")
    }

    pub fn finish(self) -> Vec<String> {
        self.lines
    }

    fn push(&mut self, line: String, context: &str) -> &mut Self {
        self.ctx
            .guard
            .check_with(&line, self.width, self.component, context, self.ctx.frame.mode);
        self.lines.push(line);
        self
    }
}
