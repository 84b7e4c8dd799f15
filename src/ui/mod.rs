//! UI rendering module for the lazyvote TUI.
//!
//! [`render`] is a stateless function of `&App`. The content area follows the
//! readiness phase: a loading placeholder, the failure panel, or the
//! dashboard once both handles are present.
//!
//! # Module Structure
//!
//! - `loading` / `failure` / `dashboard` - One screen per readiness outcome
//! - `popups` - Modal dialogs (balance input, help)
//! - `components` - Reusable UI components (toast notifications)
//! - `layout` - Layout calculations and structs
//! - `header` - Header bar rendering
//! - `footer` - Footer bar rendering
//! - `helpers` - Shared helper functions for creating styled blocks

pub mod components;
pub mod dashboard;
pub mod failure;
pub mod footer;
pub mod header;
pub mod helpers;
pub mod layout;
pub mod loading;
pub mod popups;

use ratatui::{Frame, layout::Rect};

use crate::state::{App, PopupState, Readiness};

// ============================================================================
// Main Render Entry Point
// ============================================================================

/// Main render function that orchestrates all UI rendering.
///
/// 1. Main layout (header, content, footer)
/// 2. Popup overlays based on current popup state
/// 3. Toast notifications as non-blocking overlays
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();
    let layout = layout::calculate_app_layout(size);

    header::render(frame, layout.header, app);
    render_main_content(app, frame, layout.main);
    footer::render(frame, layout.footer, app);

    render_popups(app, frame, size);

    if let Some(message) = app.ui.toast_message() {
        components::render_toast(frame, size, message, &app.theme);
    }
}

// ============================================================================
// Internal Rendering Functions
// ============================================================================

/// Render the content area for the current readiness phase.
fn render_main_content(app: &App, frame: &mut Frame, area: Rect) {
    if let Readiness::Failed(failure) = app.gate.phase() {
        failure::render(frame, area, failure, &app.theme);
        return;
    }

    match app.dashboard_view() {
        Some(view) => dashboard::render(frame, area, &view, &app.theme),
        None => loading::render(frame, area, app),
    }
}

/// Render popup overlays based on current popup state
fn render_popups(app: &App, frame: &mut Frame, area: Rect) {
    match &app.ui.popup_state {
        PopupState::BalanceInput {
            field,
            input,
            error,
        } => {
            let Some(view) = app.dashboard_view() else {
                return;
            };
            popups::balance_input::render(
                frame,
                area,
                *field,
                view.current_account(),
                input,
                error.as_deref(),
                &app.theme,
            );
        }
        PopupState::Help => popups::help::render(frame, area, &app.theme),
        PopupState::None => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
