//! Loading placeholder shown until the readiness gate opens.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{App, Readiness};

use super::layout::centered_popup_area;

/// Placeholder text while the environment is set up.
pub const LOADING_MESSAGE: &str = "Environment setup still loading...";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for an animation frame.
#[must_use]
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// What the bootstrap is currently waiting for.
fn detail(phase: &Readiness) -> &'static str {
    match phase {
        Readiness::Initializing(setup) if setup.is_complete() => "Acquiring contract",
        Readiness::Initializing(_) => "Waiting for the node to finish syncing",
        _ => "Connecting to node",
    }
}

/// Render the loading placeholder centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                spinner_frame(app.animation_tick),
                app.theme.focused_title_style(),
            ),
            Span::raw(" "),
            Span::raw(LOADING_MESSAGE),
        ]),
        Line::raw(""),
        Line::styled(detail(app.gate.phase()), app.theme.muted_style()),
    ];

    let target = centered_popup_area(area, 60, 3);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), target);
}
