//! Display utilities for Folio.
//!
//! Provides the text rendering of article records used by every boundary.

mod line;

pub use line::{ArticleLine, render_lines};

/// Format a value for display with optional truncation.
///
/// Truncation counts characters, never splitting a multi-byte character.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
