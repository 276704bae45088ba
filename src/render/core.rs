use crate::theme::{Semantic, Theme};
use crate::width::{WidthMode, pad_to_width_with};

/// Columns used by `┌─ ` before the title plus ` ` and `┐` after it.
pub const TITLE_OVERHEAD: usize = 5;

/// Box-drawing glyphs for one border family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub tee_left: char,
    pub tee_right: char,
}

impl BorderGlyphs {
    pub const SINGLE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        tee_left: '├',
        tee_right: '┤',
    };

    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        ..Self::SINGLE
    };

    pub const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
        tee_left: '┣',
        tee_right: '┫',
    };

    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
        tee_left: '╠',
        tee_right: '╣',
    };
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Interior spacing for a content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Margin {
    /// `│content│`, content gets `width - 2` columns.
    None,
    /// `│ content │`, content gets `width - 4` columns.
    Single,
    /// `│  content│`, content gets `width - 4` columns.
    #[default]
    Double,
}

impl Margin {
    fn split(self) -> (&'static str, &'static str) {
        match self {
            Margin::None => ("", ""),
            Margin::Single => (" ", " "),
            Margin::Double => ("  ", ""),
        }
    }

    /// Content columns available inside a line of `width`.
    pub fn inner_width(self, width: usize) -> usize {
        let (left, right) = self.split();
        width.saturating_sub(2 + left.len() + right.len())
    }
}

/// Fill characters needed after a title of `title_width` in a `width` panel.
pub fn calculate_border_fill(width: usize, title_width: usize) -> usize {
    width
        .saturating_sub(title_width)
        .saturating_sub(TITLE_OVERHEAD)
}

/// Line composer for one glyph family and width measurement.
///
/// Every method returns a line whose measured width is exactly `width`.
/// Interior content that is too wide is clipped to the interior; a title that
/// is too wide clips the whole line at `width`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub glyphs: BorderGlyphs,
    pub mode: WidthMode,
}

impl Frame {
    pub fn new(glyphs: BorderGlyphs, mode: WidthMode) -> Self {
        Self { glyphs, mode }
    }

    pub fn with_glyphs(mut self, glyphs: BorderGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_mode(mut self, mode: WidthMode) -> Self {
        self.mode = mode;
        self
    }

    /// `┌─ title ────┐`
    pub fn top<T: Theme + ?Sized>(&self, title: &str, width: usize, theme: &T) -> String {
        let g = &self.glyphs;
        self.titled(g.top_left, g.top_right, title, width, theme)
    }

    /// `┌──────┐`
    pub fn rule<T: Theme + ?Sized>(&self, width: usize, theme: &T) -> String {
        let g = &self.glyphs;
        self.plain(g.top_left, g.top_right, width, theme)
    }

    /// `├─ label ────┤`
    pub fn section<T: Theme + ?Sized>(&self, label: &str, width: usize, theme: &T) -> String {
        let g = &self.glyphs;
        self.titled(g.tee_left, g.tee_right, label, width, theme)
    }

    /// `└──────┘`
    pub fn bottom<T: Theme + ?Sized>(&self, width: usize, theme: &T) -> String {
        let g = &self.glyphs;
        self.plain(g.bottom_left, g.bottom_right, width, theme)
    }

    /// `│      │`
    pub fn empty<T: Theme + ?Sized>(&self, width: usize, theme: &T) -> String {
        let g = &self.glyphs;
        let mut raw = String::with_capacity(width + 4);
        raw.push(g.vertical);
        raw.extend(std::iter::repeat_n(' ', width.saturating_sub(2)));
        raw.push(g.vertical);
        self.fit(theme.fg(Semantic::Border, &raw), width)
    }

    /// `│  content   │` with the interior padded or clipped per `margin`.
    pub fn content<T: Theme + ?Sized>(
        &self,
        content: &str,
        width: usize,
        margin: Margin,
        theme: &T,
    ) -> String {
        let (left, right) = margin.split();
        let bar = theme.fg(Semantic::Border, &self.glyphs.vertical.to_string());
        let body = pad_to_width_with(content, margin.inner_width(width), self.mode);
        let line = format!("{bar}{left}{body}{right}{bar}");
        self.fit(line, width)
    }

    fn titled<T: Theme + ?Sized>(
        &self,
        left_corner: char,
        right_corner: char,
        title: &str,
        width: usize,
        theme: &T,
    ) -> String {
        let h = self.glyphs.horizontal;
        let fill = calculate_border_fill(width, self.mode.measure(title));

        let lead = format!("{left_corner}{h} ");
        let mut tail = String::with_capacity((fill + 2) * 3);
        tail.push(' ');
        tail.extend(std::iter::repeat_n(h, fill));
        tail.push(right_corner);

        let line = format!(
            "{}{}{}",
            theme.fg(Semantic::Border, &lead),
            title,
            theme.fg(Semantic::Border, &tail)
        );
        self.fit(line, width)
    }

    fn plain<T: Theme + ?Sized>(&self, left: char, right: char, width: usize, theme: &T) -> String {
        let mut raw = String::with_capacity(width * 3);
        raw.push(left);
        raw.extend(std::iter::repeat_n(self.glyphs.horizontal, width.saturating_sub(2)));
        raw.push(right);
        self.fit(theme.fg(Semantic::Border, &raw), width)
    }

    fn fit(&self, line: String, width: usize) -> String {
        if self.mode.measure(&line) == width {
            return line;
        }
        pad_to_width_with(&line, width, self.mode)
    }
}

pub fn render_top_border<T: Theme + ?Sized>(title: &str, width: usize, theme: &T) -> String {
    Frame::default().top(title, width, theme)
}

pub fn render_bottom_border<T: Theme + ?Sized>(width: usize, theme: &T) -> String {
    Frame::default().bottom(width, theme)
}

pub fn render_empty_line<T: Theme + ?Sized>(width: usize, theme: &T) -> String {
    Frame::default().empty(width, theme)
}

/// Content line with the two-space left margin used across the dashboard.
pub fn render_content_line<T: Theme + ?Sized>(content: &str, width: usize, theme: &T) -> String {
    Frame::default().content(content, width, Margin::Double, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{AnsiTheme, PlainTheme};
    use crate::width::visible_width;

    #[test]
    fn border_fill_formula() {
        assert_eq!(calculate_border_fill(100, 10), 85);
        assert_eq!(calculate_border_fill(60, 50), 5);
        assert_eq!(calculate_border_fill(60, 100), 0);
        assert_eq!(calculate_border_fill(100, 95), 0);
        assert_eq!(calculate_border_fill(0, 0), 0);
    }

    #[test]
    fn top_border_shape() {
        let border = render_top_border("Title", 15, &PlainTheme);
        assert_eq!(border, "┌─ Title ─────┐");
        assert_eq!(visible_width(&border), 15);
    }

    #[test]
    fn top_border_with_styled_title() {
        let border = render_top_border("\x1b[31mTitle\x1b[0m", 50, &PlainTheme);
        assert_eq!(visible_width(&border), 50);
        assert!(border.ends_with('┐'));
    }

    #[test]
    fn top_border_clips_oversized_title() {
        let title = "x".repeat(80);
        let border = render_top_border(&title, 20, &PlainTheme);
        assert_eq!(visible_width(&border), 20);
        assert!(border.starts_with("┌─ x"));
    }

    #[test]
    fn tiny_widths_stay_exact() {
        let theme = AnsiTheme::new();
        for width in 0..8 {
            assert_eq!(visible_width(&render_top_border("T", width, &theme)), width);
            assert_eq!(visible_width(&render_bottom_border(width, &theme)), width);
            assert_eq!(visible_width(&render_empty_line(width, &theme)), width);
            assert_eq!(visible_width(&render_content_line("abc", width, &theme)), width);
        }
    }

    #[test]
    fn bottom_and_empty_lines() {
        assert_eq!(render_bottom_border(6, &PlainTheme), "└────┘");
        assert_eq!(render_empty_line(6, &PlainTheme), "│    │");
    }

    #[test]
    fn content_margins() {
        let frame = Frame::default();
        assert_eq!(frame.content("Hi", 8, Margin::Double, &PlainTheme), "│  Hi  │");
        assert_eq!(frame.content("Hi", 8, Margin::Single, &PlainTheme), "│ Hi   │");
        assert_eq!(frame.content("Hi", 8, Margin::None, &PlainTheme), "│Hi    │");
    }

    #[test]
    fn content_overflow_keeps_right_border() {
        let line = render_content_line("abcdefghij", 8, &PlainTheme);
        assert_eq!(line, "│  abcd│");
    }

    #[test]
    fn untitled_rule() {
        let frame = Frame::default();
        assert_eq!(frame.rule(6, &PlainTheme), "┌────┐");
        assert_eq!(visible_width(&frame.rule(1, &PlainTheme)), 1);
    }

    #[test]
    fn section_uses_tees() {
        let line = Frame::default().section("Gaps", 12, &PlainTheme);
        assert_eq!(line, "├─ Gaps ───┤");
    }

    #[test]
    fn rounded_glyphs() {
        let frame = Frame::default().with_glyphs(BorderGlyphs::ROUNDED);
        assert_eq!(frame.top("A", 8, &PlainTheme), "╭─ A ──╮");
        assert_eq!(frame.bottom(4, &PlainTheme), "╰──╯");
    }

    #[test]
    fn cells_mode_pads_wide_titles() {
        let frame = Frame::default().with_mode(WidthMode::Cells);
        let line = frame.top("日本", 12, &PlainTheme);
        assert_eq!(WidthMode::Cells.measure(&line), 12);
        assert_eq!(line, "┌─ 日本 ───┐");
    }
}
