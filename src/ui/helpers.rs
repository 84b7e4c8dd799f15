//! UI helper functions for creating styled blocks.
//!
//! All helpers take the active [`Theme`] so every panel follows the
//! configured color scheme.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    symbols::border,
    widgets::{Block, Borders},
};

use crate::theme::Theme;

// ============================================================================
// Border Block Helpers
// ============================================================================

/// Creates a bordered block styled by focus state.
///
/// Focused blocks get a double border, a bullet before the title and the
/// theme's primary color; unfocused blocks get rounded muted borders.
#[must_use]
pub fn create_border_block<'a>(title: &str, focused: bool, theme: &Theme) -> Block<'a> {
    let (border_style, border_set, title_style, display_title) = if focused {
        (
            theme.focused_border_style(),
            border::DOUBLE,
            theme.focused_title_style(),
            if title.is_empty() {
                String::new()
            } else {
                format!(" ● {title} ")
            },
        )
    } else {
        (
            theme.border_style(),
            border::ROUNDED,
            theme.muted_style().add_modifier(Modifier::BOLD),
            if title.is_empty() {
                String::new()
            } else {
                format!(" {title} ")
            },
        )
    };

    Block::default()
        .borders(Borders::ALL)
        .title(display_title)
        .title_style(title_style)
        .border_set(border_set)
        .border_style(border_style)
}

/// Creates a popup-style block with centered title and rounded borders.
#[must_use]
pub fn create_popup_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .title_style(Style::new().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(theme.focused_border_style())
}

// ============================================================================
// Tests
// ============================================================================
