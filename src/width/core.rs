use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

/// SGR reset emitted after a truncated styled run.
pub const RESET: &str = "\x1b[0m";

lazy_static! {
    /// The only escape grammar treated as zero-width: `ESC [ <digits|;>* m`.
    static ref STYLE_SEQUENCE: Regex =
        Regex::new(r"\x1b\[[0-9;]*m").expect("style sequence pattern is valid");
}

/// How printable characters are converted into terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthMode {
    /// Every code point is one column, including emoji and CJK.
    ///
    /// This undercounts wide glyphs and overcounts combining marks; it is the
    /// measurement the host plugin has always used, so it stays the default.
    #[default]
    CodePoints,
    /// Terminal cell width as reported by `unicode-width`.
    Cells,
}

impl WidthMode {
    pub fn measure(self, text: &str) -> usize {
        match self {
            WidthMode::CodePoints => visible_width(text),
            WidthMode::Cells => display_width(text),
        }
    }

    fn char_width(self, ch: char) -> usize {
        match self {
            WidthMode::CodePoints => 1,
            WidthMode::Cells => UnicodeWidthChar::width(ch).unwrap_or(0),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "codepoints" | "code_points" | "chars" => Some(WidthMode::CodePoints),
            "cells" | "unicode" => Some(WidthMode::Cells),
            _ => None,
        }
    }
}

/// A run of styled text split at style-escape boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Style(&'a str),
    Text(&'a str),
}

/// Split `text` into alternating printable and style-escape runs.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    for found in STYLE_SEQUENCE.find_iter(text) {
        if found.start() > cursor {
            out.push(Segment::Text(&text[cursor..found.start()]));
        }
        out.push(Segment::Style(found.as_str()));
        cursor = found.end();
    }
    if cursor < text.len() {
        out.push(Segment::Text(&text[cursor..]));
    }
    out
}

/// Remove recognised style escapes. Malformed sequences are left in place.
pub fn strip_styles(text: &str) -> Cow<'_, str> {
    STYLE_SEQUENCE.replace_all(text, "")
}

/// Count of code points outside recognised style escapes.
pub fn visible_width(text: &str) -> usize {
    segments(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Style(_) => 0,
            Segment::Text(run) => run.chars().count(),
        })
        .sum()
}

/// Terminal cell width after stripping recognised style escapes.
///
/// Summed per character so it agrees with truncation and padding; control
/// characters count as zero.
pub fn display_width(text: &str) -> usize {
    strip_styles(text)
        .chars()
        .map(|ch| WidthMode::Cells.char_width(ch))
        .sum()
}

/// Code-point truncation; see [`truncate_to_width_with`].
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: Option<&str>) -> String {
    truncate_to_width_with(text, max_width, ellipsis, WidthMode::CodePoints)
}

/// Cut `text` so its visible width is at most `max_width`.
///
/// Style escapes that precede a retained character are kept. If anything was
/// cut after a style escape, a reset is appended so colour does not leak into
/// the border that follows. The ellipsis is only used when it fits in the
/// budget on its own.
pub fn truncate_to_width_with(
    text: &str,
    max_width: usize,
    ellipsis: Option<&str>,
    mode: WidthMode,
) -> String {
    if max_width == 0 {
        return String::new();
    }
    if mode.measure(text) <= max_width {
        return text.to_string();
    }

    let ellipsis = ellipsis
        .map(|marker| (marker, mode.measure(marker)))
        .filter(|(_, width)| *width <= max_width);
    let budget = max_width - ellipsis.map(|(_, width)| width).unwrap_or(0);

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut styled = false;

    'outer: for segment in segments(text) {
        match segment {
            Segment::Style(seq) => {
                out.push_str(seq);
                styled = true;
            }
            Segment::Text(run) => {
                for ch in run.chars() {
                    let width = mode.char_width(ch);
                    if used + width > budget {
                        break 'outer;
                    }
                    out.push(ch);
                    used += width;
                }
            }
        }
    }

    if styled {
        out.push_str(RESET);
    }
    if let Some((marker, _)) = ellipsis {
        out.push_str(marker);
    }
    out
}

/// Code-point padding; see [`pad_to_width_with`].
pub fn pad_to_width(text: &str, width: usize) -> String {
    pad_to_width_with(text, width, WidthMode::CodePoints)
}

/// Truncate or right-pad `text` to exactly `width` visible columns.
pub fn pad_to_width_with(text: &str, width: usize, mode: WidthMode) -> String {
    let mut out = truncate_to_width_with(text, width, None, mode);
    let current = mode.measure(&out);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(current)));
    out
}
