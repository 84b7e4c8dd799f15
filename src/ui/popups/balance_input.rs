//! Balance input popup.
//!
//! Stands in for the balance callbacks of the voting widgets: the user types
//! a whole token amount for the selected account and submits it.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::domain::AccountIndex;
use crate::state::BalanceField;
use crate::theme::Theme;
use crate::ui::helpers::create_popup_block;
use crate::ui::layout::centered_popup_area;

/// Renders the balance input popup.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    field: BalanceField,
    account: AccountIndex,
    input: &str,
    error: Option<&str>,
    theme: &Theme,
) {
    let popup_area = centered_popup_area(area, 64, 8);
    frame.render_widget(Clear, popup_area);

    let block = create_popup_block(field.label(), theme);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(format!("Account {account}")).style(theme.muted_style()),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", theme.focused_title_style()),
            Span::raw(input),
            Span::styled("█", theme.focused_border_style()),
        ])),
        rows[2],
    );

    let hint = match error {
        Some(message) => Line::styled(message, theme.error_style()),
        None => Line::styled("Enter: Save  Esc: Cancel", theme.muted_style()),
    };
    frame.render_widget(Paragraph::new(hint).wrap(Wrap { trim: true }), rows[4]);
}
