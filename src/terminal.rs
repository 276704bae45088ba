use crossterm::terminal;

use crate::error::{PanelError, Result};

/// Widest panel the dashboard will render when the terminal reports nothing usable.
pub const FALLBACK_WIDTH: usize = 80;

/// Current terminal width in columns.
pub fn terminal_width() -> Result<usize> {
    let (cols, _) = terminal::size()
        .map_err(|err| PanelError::Backend(format!("terminal size unavailable: {err}")))?;
    Ok(cols as usize)
}

/// Terminal width, or [`FALLBACK_WIDTH`] when stdout is not a terminal.
pub fn terminal_width_or_default() -> usize {
    match terminal_width() {
        Ok(0) | Err(_) => FALLBACK_WIDTH,
        Ok(width) => width,
    }
}
