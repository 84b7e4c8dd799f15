//! Toast notification component.
//!
//! A non-blocking overlay in the bottom-right corner. The text color follows
//! the message prefix: `[+]` for success, `[x]` for errors.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::border,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Theme;

// ============================================================================
// Constants
// ============================================================================

/// Minimum width for toast notifications.
const MIN_TOAST_WIDTH: u16 = 20;

/// Height of toast notifications.
const TOAST_HEIGHT: u16 = 3;

/// Horizontal padding from the right edge.
const TOAST_PADDING_RIGHT: u16 = 2;

/// Vertical padding from the bottom edge.
const TOAST_PADDING_BOTTOM: u16 = 2;

/// Extra padding added to message length for borders and spacing.
const TOAST_WIDTH_PADDING: u16 = 4;

// ============================================================================
// Public API
// ============================================================================

/// Renders a toast notification in the bottom-right corner of `area`.
pub fn render_toast(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let toast_area = calculate_toast_position(area, message);

    frame.render_widget(Clear, toast_area);

    let toast_block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(theme.border_style());
    let inner_area = toast_block.inner(toast_area);
    frame.render_widget(toast_block, toast_area);

    let toast_text = Paragraph::new(message)
        .style(Style::default().fg(determine_text_color(message, theme)))
        .alignment(Alignment::Center);

    frame.render_widget(toast_text, inner_area);
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Position and size of the toast within `area`.
#[must_use]
fn calculate_toast_position(area: Rect, message: &str) -> Rect {
    let message_len = u16::try_from(message.chars().count()).unwrap_or(u16::MAX);
    let toast_width = message_len
        .saturating_add(TOAST_WIDTH_PADDING)
        .min(area.width / 2)
        .max(MIN_TOAST_WIDTH)
        .min(area.width);

    let toast_x = area.x + area.width.saturating_sub(toast_width + TOAST_PADDING_RIGHT);
    let toast_y = area.y
        + area
            .height
            .saturating_sub(TOAST_HEIGHT + TOAST_PADDING_BOTTOM);

    Rect::new(toast_x, toast_y, toast_width, TOAST_HEIGHT.min(area.height))
}

/// Text color for a message, by prefix.
#[must_use]
fn determine_text_color(message: &str, theme: &Theme) -> Color {
    if message.starts_with("[+]") {
        theme.success
    } else if message.starts_with("[x]") {
        theme.error
    } else {
        theme.primary
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, test_terminal};
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    #[rstest]
    #[case::normal(Rect::new(0, 0, 100, 50), "Test message", MIN_TOAST_WIDTH, 50)]
    #[case::long(
        Rect::new(0, 0, 100, 50),
        "This is a very long message that should be constrained",
        MIN_TOAST_WIDTH,
        50
    )]
    #[case::small_area(Rect::new(0, 0, 30, 10), "Test", MIN_TOAST_WIDTH, 30)]
    fn test_calculate_toast_position(
        #[case] area: Rect,
        #[case] message: &str,
        #[case] min_width: u16,
        #[case] max_width: u16,
    ) {
        let toast = calculate_toast_position(area, message);

        assert_eq!(toast.height, TOAST_HEIGHT);
        assert!(toast.width >= min_width);
        assert!(toast.width <= max_width);
        assert!(toast.right() <= area.right());
        assert!(toast.bottom() <= area.bottom());
    }

    #[rstest]
    #[case("[+] Copied account 3", Color::Green)]
    #[case("[x] Clipboard not available", Color::Red)]
    #[case("Theme: dark", Color::Cyan)]
    fn test_determine_text_color(#[case] message: &str, #[case] expected: Color) {
        assert_eq!(determine_text_color(message, &Theme::default()), expected);
    }

    #[rstest]
    fn test_render_toast_bottom_right(mut test_terminal: Terminal<TestBackend>) {
        test_terminal
            .draw(|frame| render_toast(frame, frame.area(), "[+] Saved", &Theme::default()))
            .unwrap();

        let text = buffer_text(test_terminal.backend().buffer());
        let rows: Vec<&str> = text.lines().collect();
        // 30 rows: toast occupies rows 25..28 with its text on row 26.
        assert!(rows[26].contains("[+] Saved"));
        assert!(!rows[0].contains("[+] Saved"));
    }
}
