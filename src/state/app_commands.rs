//! Command execution and input handling for the lazyvote application.
//!
//! Key events are mapped to commands by [`KeyMapper`] using the context
//! derived here; commands then mutate the app state.

use crossterm::event::KeyEvent;

use super::{App, AppConfig, BalanceField, PopupState, Readiness};
use crate::clipboard;
use crate::commands::{AppCommand, InputContext, KeyMapper};
use crate::theme::Theme;

/// Toast duration for routine confirmations.
const TOAST_TICKS: u8 = 20;

impl App {
    pub(crate) fn handle_key_event(&mut self, key_event: KeyEvent) {
        let context = self.input_context();
        let command = KeyMapper::map_key(key_event, &context);
        self.execute(command);
    }

    /// Determines which key bindings are active.
    ///
    /// Popups take precedence; without one the readiness phase decides.
    #[must_use]
    pub fn input_context(&self) -> InputContext {
        match &self.ui.popup_state {
            PopupState::BalanceInput { .. } => return InputContext::BalanceInput,
            PopupState::Help => return InputContext::Help,
            PopupState::None => {}
        }

        if self.gate.is_ready() && self.selection.is_some() {
            return InputContext::Dashboard;
        }
        match self.gate.phase() {
            Readiness::Failed(_) => InputContext::Failed,
            _ => InputContext::Loading,
        }
    }

    /// Executes an application command.
    pub fn execute(&mut self, command: AppCommand) {
        match command {
            // === Application Control ===
            AppCommand::Quit => {
                self.exit = true;
            }
            AppCommand::Retry => self.retry(),
            AppCommand::CycleTheme => self.cycle_theme(),
            AppCommand::ShowHelp => {
                self.ui.popup_state = PopupState::Help;
            }

            // === Account Selection ===
            AppCommand::NextAccount => {
                if let Some(selection) = self.selection.as_mut() {
                    selection.select_next();
                }
            }
            AppCommand::PrevAccount => {
                if let Some(selection) = self.selection.as_mut() {
                    selection.select_prev();
                }
            }
            AppCommand::SelectAccount(slot) => {
                if let Some(selection) = self.selection.as_mut()
                    && let Err(err) = selection.account_change(i64::from(slot))
                {
                    self.ui.show_toast(format!("[x] {err}"), TOAST_TICKS);
                }
            }
            AppCommand::CopyAddress => self.copy_selected_address(),

            // === Balances ===
            AppCommand::EditTokenBalance => self.open_balance_input(BalanceField::Token),
            AppCommand::EditStakedBalance => self.open_balance_input(BalanceField::Staked),

            // === Text Input ===
            AppCommand::TypeChar(c) => self.ui.push_char(c),
            AppCommand::Backspace => self.ui.pop_char(),
            AppCommand::Submit => self.submit_balance(),
            AppCommand::Dismiss => self.ui.dismiss_popup(),

            AppCommand::Noop => {}
        }
    }

    fn retry(&mut self) {
        if self.gate.begin_retry().is_some() {
            self.selection = None;
            self.launch();
        }
    }

    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::new(self.config.theme);

        if self.persist_config
            && let Err(err) = AppConfig::persist_theme(self.config.theme)
        {
            tracing::warn!(error = %err, "failed to save theme");
            self.ui
                .show_toast(format!("[x] Theme not saved: {err}"), TOAST_TICKS);
            return;
        }
        self.ui
            .show_toast(format!("Theme: {}", self.config.theme.as_str()), TOAST_TICKS);
    }

    fn copy_selected_address(&mut self) {
        let Some(view) = self.dashboard_view() else {
            return;
        };
        let account = view.current_account();
        let Some(address) = view.selected_address().map(str::to_owned) else {
            self.ui
                .show_toast(format!("[x] Account {account} is unavailable"), TOAST_TICKS);
            return;
        };

        match clipboard::copy_text(&address) {
            Ok(()) => self
                .ui
                .show_toast(format!("[+] Copied account {account}"), TOAST_TICKS),
            Err(err) => self.ui.show_toast(format!("[x] {err}"), TOAST_TICKS),
        }
    }

    fn open_balance_input(&mut self, field: BalanceField) {
        if self.selection.is_some() {
            self.ui.popup_state = PopupState::balance_input(field);
        }
    }

    /// Applies the balance popup's input. Invalid input keeps the popup open
    /// with the validation error and leaves the selection untouched.
    fn submit_balance(&mut self) {
        let PopupState::BalanceInput { field, input, error } = &mut self.ui.popup_state else {
            return;
        };
        let Some(selection) = self.selection.as_mut() else {
            return;
        };

        match field.apply(selection, input) {
            Ok(amount) => {
                let message = format!("[+] {} set to {}", field.label(), amount.grouped());
                self.ui.dismiss_popup();
                self.ui.show_toast(message, TOAST_TICKS);
            }
            Err(err) => {
                *error = Some(err.to_string());
            }
        }
    }
}
