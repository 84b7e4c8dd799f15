//! Header rendering for the lazyvote TUI
//!
//! Renders the logo, the RPC endpoint and the bootstrap status.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{App, Readiness};
use crate::theme::{Theme, ThemeVariant};

use super::helpers::create_border_block;

/// Render the application header
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let header_block = create_border_block("", false, &app.theme);
    frame.render_widget(header_block, area);

    if area.height <= 2 {
        return;
    }

    let title = if app.gate.phase().is_loading() && app.theme.variant != ThemeVariant::Mono {
        create_animated_logo(app.animation_tick)
    } else {
        create_static_logo(&app.theme)
    };

    let title_area = Rect::new(
        area.x + 2,
        area.y + 1,
        10.min(area.width.saturating_sub(2)),
        1,
    );
    frame.render_widget(Paragraph::new(title), title_area);

    if area.width > 60 {
        let url_area = Rect::new(area.x + 14, area.y + 1, area.width.saturating_sub(44), 1);
        frame.render_widget(
            Paragraph::new(app.config.rpc_url.as_str()).style(app.theme.muted_style()),
            url_area,
        );
    }

    if area.width > 40 {
        render_status_indicator(frame, area, app);
    }
}

/// Create the animated logo while the bootstrap runs
fn create_animated_logo(animation_tick: u64) -> Line<'static> {
    let time = animation_tick as f32 * 0.15;
    let glow = ((time * 0.8).sin() + 1.0) / 2.0;
    let vote_glow = ((time * 0.8 + 1.0).sin() + 1.0) / 2.0;

    let lazy_color = Color::Rgb(
        (50.0 * glow) as u8,
        (120.0 + glow * 135.0) as u8,
        (80.0 * glow) as u8,
    );
    let vote_color = Color::Rgb(
        (180.0 + vote_glow * 75.0) as u8,
        (100.0 * vote_glow) as u8,
        (140.0 + vote_glow * 115.0) as u8,
    );
    let bracket = (100.0 + glow * 155.0) as u8;
    let bracket_color = Color::Rgb(bracket, bracket, bracket);

    Line::from(vec![
        Span::styled("[", Style::default().fg(bracket_color)),
        Span::styled(
            "lazy",
            Style::default().fg(lazy_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "vote",
            Style::default().fg(vote_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("]", Style::default().fg(bracket_color)),
    ])
}

/// Create the static logo
fn create_static_logo(theme: &Theme) -> Line<'static> {
    let bold = Style::new().add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::raw("["),
        Span::styled("lazy", bold.fg(theme.success)),
        Span::styled("vote", bold.fg(theme.primary)),
        Span::raw("]"),
    ])
}

/// Label and color of the bootstrap status.
fn status(app: &App) -> (String, Color) {
    let theme = &app.theme;
    match app.gate.phase() {
        Readiness::Uninitialized => ("● Connecting".to_string(), theme.warning),
        Readiness::Initializing(setup) if !setup.is_complete() => {
            ("● Syncing".to_string(), theme.warning)
        }
        Readiness::Initializing(_) => ("● Loading contract".to_string(), theme.warning),
        Readiness::Ready { setup, .. } => (
            format!("● Network {}", setup.connection().network_id),
            theme.success,
        ),
        Readiness::Failed(_) => ("● Failed".to_string(), theme.error),
    }
}

/// Render the status indicator on the right side
fn render_status_indicator(frame: &mut Frame, area: Rect, app: &App) {
    let (label, color) = status(app);
    let indicator = Paragraph::new(label)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Right);

    let indicator_area = Rect::new(area.right().saturating_sub(26), area.y + 1, 24, 1);
    frame.render_widget(indicator, indicator_area);
}

// ============================================================================
// Tests
// ============================================================================
