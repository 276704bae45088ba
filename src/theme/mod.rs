//! Semantic colouring injected into every render call.
//!
//! The composer never interprets colours; it only measures what a theme
//! returns. Any `Fn(Semantic, &str) -> String` closure is a theme.

use crossterm::style::{Attribute, Color, Stylize, style};

/// Colour roles the widgets ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    Border,
    Text,
    Accent,
    Dim,
    Success,
    Warning,
    Error,
}

pub trait Theme {
    fn fg(&self, color: Semantic, text: &str) -> String;

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }
}

impl<F> Theme for F
where
    F: Fn(Semantic, &str) -> String,
{
    fn fg(&self, color: Semantic, text: &str) -> String {
        self(color, text)
    }
}

/// Identity theme: text passes through unstyled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTheme;

impl Theme for PlainTheme {
    fn fg(&self, _color: Semantic, text: &str) -> String {
        text.to_string()
    }
}

/// SGR theme backed by crossterm colours.
#[derive(Debug, Clone)]
pub struct AnsiTheme {
    pub border: Color,
    pub text: Color,
    pub accent: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for AnsiTheme {
    fn default() -> Self {
        Self {
            border: Color::DarkGrey,
            text: Color::Reset,
            accent: Color::Cyan,
            dim: Color::Grey,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl AnsiTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self, role: Semantic) -> Color {
        match role {
            Semantic::Border => self.border,
            Semantic::Text => self.text,
            Semantic::Accent => self.accent,
            Semantic::Dim => self.dim,
            Semantic::Success => self.success,
            Semantic::Warning => self.warning,
            Semantic::Error => self.error,
        }
    }
}

impl Theme for AnsiTheme {
    fn fg(&self, color: Semantic, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.color(color) {
            Color::Reset => text.to_string(),
            color => style(text).with(color).to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        style(text).attribute(Attribute::Bold).to_string()
    }
}
