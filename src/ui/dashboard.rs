//! The main voting dashboard.
//!
//! Rendered only from a [`DashboardView`], so it cannot be reached before the
//! readiness gate holds a complete setup handle and a contract.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::domain::{AccountIndex, TokenAmount};
use crate::state::DashboardView;
use crate::theme::Theme;

use super::helpers::create_border_block;
use super::layout::calculate_dashboard_layout;

/// Shown for balances that were never reported.
pub const UNSET_BALANCE: &str = "—";

/// Shown for slots the node does not expose.
pub const UNAVAILABLE: &str = "unavailable";

/// Render the dashboard panels.
pub fn render(frame: &mut Frame, area: Rect, view: &DashboardView<'_>, theme: &Theme) {
    let layout = calculate_dashboard_layout(area);
    render_accounts(frame, layout.accounts, view, theme);
    render_balances(frame, layout.balances, view, theme);
    render_contract(frame, layout.contract, view, theme);
}

fn render_accounts(frame: &mut Frame, area: Rect, view: &DashboardView<'_>, theme: &Theme) {
    let items: Vec<ListItem> = AccountIndex::all()
        .map(|index| {
            let address = view.setup.account(index);
            let address_span = match address {
                Some(address) => Span::raw(address.to_string()),
                None => Span::styled(UNAVAILABLE, theme.muted_style()),
            };
            ListItem::new(Line::from(vec![Span::raw(format!(" {index}  ")), address_span]))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(view.current_account().as_usize()));
    let list = List::new(items)
        .block(create_border_block("Accounts", true, theme))
        .highlight_style(theme.selected_style())
        .highlight_symbol("▶");

    frame.render_stateful_widget(list, area, &mut state);
}

fn balance_text(amount: Option<TokenAmount>) -> String {
    amount.map_or_else(|| UNSET_BALANCE.to_string(), TokenAmount::grouped)
}

fn render_balances(frame: &mut Frame, area: Rect, view: &DashboardView<'_>, theme: &Theme) {
    let label = |text: &'static str| Span::styled(text, theme.muted_style());
    let lines = vec![
        Line::from(vec![
            label("Account  "),
            Span::raw(view.current_account().to_string()),
        ]),
        Line::from(vec![
            label("Tokens   "),
            Span::raw(balance_text(view.selection.token_balance())),
        ]),
        Line::from(vec![
            label("Staked   "),
            Span::raw(balance_text(view.selection.staked_token_balance())),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(create_border_block("Balances", false, theme)),
        area,
    );
}

fn render_contract(frame: &mut Frame, area: Rect, view: &DashboardView<'_>, theme: &Theme) {
    let contract = view.contract;
    let (reads, writes) = contract.method_counts();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name     ", theme.muted_style()),
            Span::styled(contract.name.as_str(), theme.focused_title_style()),
        ]),
        Line::styled("Address", theme.muted_style()),
        Line::raw(contract.address.as_str()),
        Line::from(vec![
            Span::styled("Network  ", theme.muted_style()),
            Span::raw(contract.network_id.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Ready    ", theme.muted_style()),
            Span::raw(view.ready_at.format("%H:%M:%S").to_string()),
        ]),
        Line::from(vec![
            Span::styled("Methods  ", theme.muted_style()),
            Span::raw(format!("{reads} read, {writes} write")),
        ]),
        Line::raw(""),
    ];
    lines.extend(contract.methods.iter().map(|method| {
        let kind = if method.read_only { "call" } else { "send" };
        Line::from(vec![
            Span::styled(format!("  {kind}  "), theme.muted_style()),
            Span::raw(method.name.as_str()),
        ])
    }));

    frame.render_widget(
        Paragraph::new(lines).block(create_border_block("Contract", false, theme)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Local, TimeZone};
    use ratatui::{Terminal, backend::TestBackend};
    use rstest::rstest;

    use crate::state::UiSelectionState;
    use crate::test_utils::{ContractMother, SetupMother, buffer_text, test_terminal};

    fn draw(
        terminal: &mut Terminal<TestBackend>,
        accounts: usize,
        selection: &UiSelectionState,
    ) -> String {
        let setup = Arc::new(SetupMother::complete_with_accounts(accounts));
        let contract = Arc::new(ContractMother::voting());
        let view = DashboardView {
            setup: &setup,
            contract: &contract,
            selection,
            ready_at: Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap(),
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &view, &Theme::default()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[rstest]
    fn test_lists_all_slots_and_marks_missing(mut test_terminal: Terminal<TestBackend>) {
        let text = draw(&mut test_terminal, 3, &UiSelectionState::new());

        assert!(text.contains(&SetupMother::address(0)));
        assert!(text.contains(&SetupMother::address(2)));
        assert_eq!(text.matches(UNAVAILABLE).count(), 6);
        assert!(text.contains(" 8  "));
    }

    #[rstest]
    fn test_selected_account_and_balances(mut test_terminal: Terminal<TestBackend>) {
        let mut selection = UiSelectionState::new();
        selection.account_change(3).unwrap();
        selection.change_token_balance("1234567").unwrap();

        let text = draw(&mut test_terminal, 9, &selection);

        assert!(text.contains(&format!("▶ 3  {}", SetupMother::address(3))));
        assert!(text.contains("Tokens   1,234,567"));
        assert!(text.contains(&format!("Staked   {UNSET_BALANCE}")));
        assert!(text.contains("Account  3"));
    }

    #[rstest]
    fn test_contract_panel(mut test_terminal: Terminal<TestBackend>) {
        let text = draw(&mut test_terminal, 1, &UiSelectionState::new());

        assert!(text.contains("Name     Voting"));
        assert!(text.contains("Network  5777"));
        assert!(text.contains("Ready    09:30:05"));
        assert!(text.contains("Methods  2 read, 2 write"));
        assert!(text.contains("send  castVote"));
        assert!(text.contains("call  getPollStatus"));
    }

    #[test]
    fn test_balance_text() {
        assert_eq!(balance_text(None), UNSET_BALANCE);
        insta::assert_snapshot!(balance_text(Some(TokenAmount::new(1_000_000))), @"1,000,000");
    }
}
