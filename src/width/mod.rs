//! Visible-width helpers for styled terminal text.
//!
//! Everything in the crate measures lines through this module so the panel
//! composer, the width guard and the widgets agree on what a column is.

mod core;

pub use self::core::{
    RESET, Segment, WidthMode, display_width, pad_to_width, pad_to_width_with, segments,
    strip_styles, truncate_to_width, truncate_to_width_with, visible_width,
};
