//! Per-panel memoization of rendered lines.
//!
//! A cache belongs to exactly one widget. It is keyed by the render width and
//! a blake3 fingerprint of the render context (theme output, glyphs, width
//! mode), so a theme swap between calls misses. Widget data changes must
//! call [`RenderCache::invalidate`].

use blake3::{Hash, Hasher};

use crate::render::RenderContext;
use crate::theme::Semantic;
use crate::width::WidthMode;

const SAMPLE: &str = "sample";
const ROLES: [Semantic; 7] = [
    Semantic::Border,
    Semantic::Text,
    Semantic::Accent,
    Semantic::Dim,
    Semantic::Success,
    Semantic::Warning,
    Semantic::Error,
];

#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    key: Option<(usize, Hash)>,
    lines: Vec<String>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, width: usize, fingerprint: &Hash) -> Option<&[String]> {
        match &self.key {
            Some((cached_width, cached)) if *cached_width == width && cached == fingerprint => {
                Some(&self.lines)
            }
            _ => None,
        }
    }

    pub fn store(&mut self, width: usize, fingerprint: Hash, lines: Vec<String>) {
        self.key = Some((width, fingerprint));
        self.lines = lines;
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.lines.clear();
    }

    pub fn is_warm(&self) -> bool {
        self.key.is_some()
    }
}

/// Fingerprint everything in `ctx` that can change the rendered bytes.
pub fn context_fingerprint(ctx: &RenderContext<'_>) -> Hash {
    let mut hasher = Hasher::new();
    for role in ROLES {
        hasher.update(ctx.theme.fg(role, SAMPLE).as_bytes());
        hasher.update(&[0]);
    }
    hasher.update(ctx.theme.bold(SAMPLE).as_bytes());
    hasher.update(&[0]);

    let g = ctx.frame.glyphs;
    let glyphs: String = [
        g.top_left,
        g.top_right,
        g.bottom_left,
        g.bottom_right,
        g.horizontal,
        g.vertical,
        g.tee_left,
        g.tee_right,
    ]
    .iter()
    .collect();
    hasher.update(glyphs.as_bytes());
    let mode: &[u8] = match ctx.frame.mode {
        WidthMode::CodePoints => b"codepoints",
        WidthMode::Cells => b"cells",
    };
    hasher.update(mode);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::WidthGuard;
    use crate::render::{BorderGlyphs, Frame};
    use crate::theme::{PlainTheme, Semantic};

    #[test]
    fn hit_requires_same_width_and_fingerprint() {
        let a = blake3::hash(b"a");
        let b = blake3::hash(b"b");
        let mut cache = RenderCache::new();
        assert!(cache.get(40, &a).is_none());

        cache.store(40, a, vec!["line".to_string()]);
        assert_eq!(cache.get(40, &a), Some(&["line".to_string()][..]));
        assert!(cache.get(41, &a).is_none());
        assert!(cache.get(40, &b).is_none());

        cache.invalidate();
        assert!(!cache.is_warm());
        assert!(cache.get(40, &a).is_none());
    }

    #[test]
    fn fingerprint_tracks_theme_and_frame() {
        let guard = WidthGuard::disabled();
        let plain = RenderContext::new(&PlainTheme, &guard);
        let brackets = |_: Semantic, text: &str| format!("[{text}]");
        let bracketed = RenderContext::new(&brackets, &guard);
        let rounded = plain.with_frame(Frame::default().with_glyphs(BorderGlyphs::ROUNDED));

        assert_eq!(context_fingerprint(&plain), context_fingerprint(&plain));
        assert_ne!(context_fingerprint(&plain), context_fingerprint(&bracketed));
        assert_ne!(context_fingerprint(&plain), context_fingerprint(&rounded));
    }
}
