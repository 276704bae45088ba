use crate::theme::{Semantic, Theme};

pub const FILLED_CELL: char = '▓';
pub const EMPTY_CELL: char = '░';

/// Colour roles for the two halves of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarStyle {
    pub filled: Semantic,
    pub empty: Semantic,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            filled: Semantic::Accent,
            empty: Semantic::Dim,
        }
    }
}

impl BarStyle {
    pub fn filled(filled: Semantic) -> Self {
        Self {
            filled,
            ..Self::default()
        }
    }
}

/// `width` cells of `▓`/`░`. Percent is clamped to 0..=100; NaN renders empty.
pub fn render_progress_bar<T: Theme + ?Sized>(
    percent: f64,
    width: usize,
    style: BarStyle,
    theme: &T,
) -> String {
    let ratio = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0) / 100.0
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);

    let mut out = String::new();
    if filled > 0 {
        let run: String = std::iter::repeat_n(FILLED_CELL, filled).collect();
        out.push_str(&theme.fg(style.filled, &run));
    }
    if filled < width {
        let run: String = std::iter::repeat_n(EMPTY_CELL, width - filled).collect();
        out.push_str(&theme.fg(style.empty, &run));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{AnsiTheme, PlainTheme};
    use crate::width::visible_width;

    #[test]
    fn fills_proportionally() {
        assert_eq!(render_progress_bar(60.0, 5, BarStyle::default(), &PlainTheme), "▓▓▓░░");
        assert_eq!(render_progress_bar(0.0, 4, BarStyle::default(), &PlainTheme), "░░░░");
        assert_eq!(render_progress_bar(100.0, 4, BarStyle::default(), &PlainTheme), "▓▓▓▓");
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(render_progress_bar(150.0, 3, BarStyle::default(), &PlainTheme), "▓▓▓");
        assert_eq!(render_progress_bar(-20.0, 3, BarStyle::default(), &PlainTheme), "░░░");
        assert_eq!(render_progress_bar(f64::NAN, 3, BarStyle::default(), &PlainTheme), "░░░");
    }

    #[test]
    fn styled_bar_keeps_width() {
        let bar = render_progress_bar(33.0, 10, BarStyle::filled(Semantic::Success), &AnsiTheme::new());
        assert_eq!(visible_width(&bar), 10);
        assert_eq!(render_progress_bar(50.0, 0, BarStyle::default(), &PlainTheme), "");
    }
}
