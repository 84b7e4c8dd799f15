//! Failure panel for a bootstrap attempt that did not reach `Ready`.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::state::SetupFailure;
use crate::theme::Theme;

use super::helpers::create_border_block;
use super::layout::centered_popup_area;

/// Render `failure` with a retry hint.
pub fn render(frame: &mut Frame, area: Rect, failure: &SetupFailure, theme: &Theme) {
    let width = area.width.saturating_sub(8).min(72);
    let panel = centered_popup_area(area, width, 9);
    frame.render_widget(Clear, panel);

    let block = create_border_block("Setup Failed", true, theme).border_style(theme.error_style());
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let stage = failure.stage.label();
    let lines = vec![
        Line::from(vec![
            Span::styled("Stage: ", theme.muted_style()),
            Span::styled(stage, theme.error_style()),
        ]),
        Line::raw(""),
        Line::raw(failure.message.as_str()),
        Line::raw(""),
        Line::styled("r: Retry  q: Quit", theme.muted_style()),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
