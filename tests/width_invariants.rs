use dex_panels::render::{BorderGlyphs, Frame, Margin};
use dex_panels::{
    AnsiTheme, PlainTheme, Semantic, Theme, WidthMode, calculate_border_fill,
    render_bottom_border, render_content_line, render_empty_line, render_top_border,
    truncate_to_width, visible_width,
};

const TITLES: &[&str] = &[
    "",
    "T",
    "Smart Work: Planning",
    "\x1b[1;36mPromotion Readiness: IC4 → IC5\x1b[0m",
    "📊 Week Progress ✅",
    "a title that is considerably longer than most of the widths in the grid below",
];

const CONTENT: &[&str] = &[
    "",
    "Hi",
    "\x1b[32m▓▓▓▓▓░░░░░\x1b[0m 50%",
    "\x1b[33mwarning without a reset",
    "\x1b[2Kerase-line is not a style and counts as text",
    "x",
];

fn identity(_: Semantic, text: &str) -> String {
    text.to_string()
}

#[test]
fn every_line_kind_is_exact_across_the_grid() {
    let ansi = AnsiTheme::new();
    let themes: [&dyn Theme; 3] = [&PlainTheme, &ansi, &identity];

    for theme in themes {
        for width in 0..=120 {
            for title in TITLES {
                let line = render_top_border(title, width, theme);
                assert_eq!(visible_width(&line), width, "top {title:?} @ {width}");
            }
            for content in CONTENT {
                let line = render_content_line(content, width, theme);
                assert_eq!(visible_width(&line), width, "content {content:?} @ {width}");
            }
            assert_eq!(visible_width(&render_bottom_border(width, theme)), width);
            assert_eq!(visible_width(&render_empty_line(width, theme)), width);
        }
    }
}

#[test]
fn other_frames_hold_the_invariant() {
    let glyphs = [
        BorderGlyphs::SINGLE,
        BorderGlyphs::ROUNDED,
        BorderGlyphs::HEAVY,
        BorderGlyphs::DOUBLE,
    ];
    let margins = [Margin::None, Margin::Single, Margin::Double];

    for glyph in glyphs {
        for mode in [WidthMode::CodePoints, WidthMode::Cells] {
            let frame = Frame::new(glyph, mode);
            for width in [0, 1, 2, 5, 17, 64] {
                for title in TITLES {
                    assert_eq!(mode.measure(&frame.top(title, width, &PlainTheme)), width);
                    assert_eq!(mode.measure(&frame.section(title, width, &PlainTheme)), width);
                }
                for margin in margins {
                    for content in CONTENT {
                        let line = frame.content(content, width, margin, &PlainTheme);
                        assert_eq!(mode.measure(&line), width, "{margin:?} {content:?} @ {width}");
                    }
                }
            }
        }
    }
}

#[test]
fn truncation_never_exceeds_the_budget() {
    for text in TITLES.iter().chain(CONTENT) {
        for max in 0..40 {
            for ellipsis in [None, Some("…"), Some("...")] {
                let cut = truncate_to_width(text, max, ellipsis);
                assert!(visible_width(&cut) <= max, "{text:?} max {max}");
            }
        }
    }
}

#[test]
fn plain_text_width_is_code_point_count() {
    for text in ["", "abc", "┌─┐", "日本語", "✅ done", "tab\tand space"] {
        assert_eq!(visible_width(text), text.chars().count());
    }
    assert_eq!(visible_width("\x1b[1;32mbold green\x1b[0m"), 10);
}

#[test]
fn fill_matches_reference_values() {
    assert_eq!(calculate_border_fill(100, 10), 85);
    assert_eq!(calculate_border_fill(60, 100), 0);
}

#[test]
fn rendering_is_deterministic() {
    let theme = AnsiTheme::new();
    for width in [10, 40, 99] {
        assert_eq!(
            render_top_border("Task Board", width, &theme),
            render_top_border("Task Board", width, &theme)
        );
        assert_eq!(
            render_content_line("row", width, &theme),
            render_content_line("row", width, &theme)
        );
    }
}

#[test]
fn closure_theme_content_line() {
    let line = render_content_line("Hi", 20, &identity);
    assert_eq!(visible_width(&line), 20);
    assert!(line.contains("Hi"));
}

#[test]
fn empty_text_is_invisible_under_every_theme() {
    let ansi = AnsiTheme::new();
    let themes: [&dyn Theme; 3] = [&PlainTheme, &ansi, &identity];
    for theme in themes {
        for role in [
            Semantic::Border,
            Semantic::Text,
            Semantic::Accent,
            Semantic::Dim,
            Semantic::Success,
            Semantic::Warning,
            Semantic::Error,
        ] {
            assert_eq!(visible_width(&theme.fg(role, "")), 0);
        }
    }
}
