//! Footer rendering module for the lazyvote TUI.
//!
//! Shows the key bindings of the active input context.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::Paragraph,
};

use crate::commands::InputContext;
use crate::state::App;

// ============================================================================
// Footer Rendering
// ============================================================================

/// Key hints for an input context.
#[must_use]
pub const fn hints(context: InputContext) -> &'static str {
    match context {
        InputContext::Loading => "q:Quit",
        InputContext::Failed => "r:Retry  q:Quit",
        InputContext::Dashboard => {
            "↑↓:Account  0-8:Jump  t:Tokens  s:Staked  c:Copy  m:Theme  ?:Help  q:Quit"
        }
        InputContext::BalanceInput => "Enter:Save  Esc:Cancel",
        InputContext::Help => "Esc:Close",
    }
}

/// Renders the footer bar with keyboard shortcuts.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let footer = Paragraph::new(hints(app.input_context()))
        .style(app.theme.muted_style())
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

// ============================================================================
// Tests
// ============================================================================
