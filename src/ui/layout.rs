//! Layout calculations for the lazyvote TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

// ============================================================================
// Constants
// ============================================================================

/// Height of the header area in terminal rows
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the footer area in terminal rows
pub const FOOTER_HEIGHT: u16 = 1;

/// Width of the account selector column
pub const ACCOUNTS_WIDTH: u16 = 50;

// ============================================================================
// Layout Structs
// ============================================================================

/// Main application layout areas
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    /// Header area (logo, node status)
    pub header: Rect,
    /// Main content area (loading, failure or dashboard)
    pub main: Rect,
    /// Footer area (keybinding hints)
    pub footer: Rect,
}

/// Dashboard panels
#[derive(Debug, Clone, Copy)]
pub struct DashboardLayout {
    /// Account selector (left)
    pub accounts: Rect,
    /// Token balances (top right)
    pub balances: Rect,
    /// Contract details (bottom right)
    pub contract: Rect,
}

// ============================================================================
// Layout Functions
// ============================================================================

/// Calculate the main application layout from the terminal area
#[must_use]
pub fn calculate_app_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    AppLayout {
        header: chunks[0],
        main: chunks[1],
        footer: chunks[2],
    }
}

/// Calculate the dashboard panels: accounts on the left, balances above
/// the contract panel on the right.
#[must_use]
pub fn calculate_dashboard_layout(area: Rect) -> DashboardLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(ACCOUNTS_WIDTH), Constraint::Min(20)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(columns[1]);

    DashboardLayout {
        accounts: columns[0],
        balances: right[0],
        contract: right[1],
    }
}

/// Calculate a centered popup area within a parent area
///
/// # Arguments
/// * `parent` - The parent area to center within
/// * `width` - Desired popup width in columns
/// * `height` - Desired popup height in rows
#[must_use]
pub fn centered_popup_area(parent: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(parent.width.saturating_sub(4));
    let popup_height = height.min(parent.height.saturating_sub(4));

    let popup_x = parent.x + (parent.width.saturating_sub(popup_width)) / 2;
    let popup_y = parent.y + (parent.height.saturating_sub(popup_height)) / 2;

    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

// ============================================================================
// Tests
// ============================================================================
