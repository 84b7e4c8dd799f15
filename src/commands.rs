//! Command pattern for key event handling in the TUI application.
//!
//! Key input is translated into an [`AppCommand`] by the pure [`KeyMapper`],
//! based on the current [`InputContext`]. The app then executes the command.
//! Selection commands are only produced in the `Dashboard` context, so no
//! account or balance change can happen before the readiness gate opens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// Input Context
// ============================================================================

/// Represents the current input context for key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Bootstrap in progress; only quitting is possible.
    Loading,
    /// Bootstrap failed; retry or quit.
    Failed,
    /// The dashboard is shown.
    Dashboard,
    /// The balance input popup is open.
    BalanceInput,
    /// The help popup is open.
    Help,
}

// ============================================================================
// App Commands
// ============================================================================

/// All possible commands the application can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    // === Application Control ===
    /// Exit the application.
    Quit,
    /// Start a new bootstrap attempt after a failure.
    Retry,
    /// Switch to the next color scheme and persist it.
    CycleTheme,
    /// Open the key binding help.
    ShowHelp,

    // === Account Selection ===
    /// Select the next account slot.
    NextAccount,
    /// Select the previous account slot.
    PrevAccount,
    /// Select an account slot directly.
    SelectAccount(u8),
    /// Copy the selected account address to the clipboard.
    CopyAddress,

    // === Balances ===
    /// Open the token balance input.
    EditTokenBalance,
    /// Open the staked token balance input.
    EditStakedBalance,

    // === Text Input ===
    /// Type a character into the input.
    TypeChar(char),
    /// Delete the last character of the input.
    Backspace,
    /// Submit the input.
    Submit,
    /// Close the current popup.
    Dismiss,

    // === No Operation ===
    /// No action to perform (unhandled key).
    Noop,
}

// ============================================================================
// Key Mapper
// ============================================================================

/// Maps key events to application commands based on the current context.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMapper;

impl KeyMapper {
    /// Maps a key event to an application command.
    ///
    /// This is a pure function with no side effects.
    #[must_use]
    pub fn map_key(key: KeyEvent, context: &InputContext) -> AppCommand {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return AppCommand::Quit;
        }

        match context {
            InputContext::Loading => Self::map_loading_keys(key),
            InputContext::Failed => Self::map_failed_keys(key),
            InputContext::Dashboard => Self::map_dashboard_keys(key),
            InputContext::BalanceInput => Self::map_balance_input_keys(key),
            InputContext::Help => Self::map_help_keys(key),
        }
    }

    fn map_loading_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
            _ => AppCommand::Noop,
        }
    }

    fn map_failed_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
            KeyCode::Char('r') | KeyCode::Enter => AppCommand::Retry,
            _ => AppCommand::Noop,
        }
    }

    fn map_dashboard_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
            KeyCode::Up | KeyCode::Char('k') => AppCommand::PrevAccount,
            KeyCode::Down | KeyCode::Char('j') => AppCommand::NextAccount,
            KeyCode::Char(c @ '0'..='8') => AppCommand::SelectAccount(c as u8 - b'0'),
            KeyCode::Char('t') => AppCommand::EditTokenBalance,
            KeyCode::Char('s') => AppCommand::EditStakedBalance,
            KeyCode::Char('c') => AppCommand::CopyAddress,
            KeyCode::Char('m') => AppCommand::CycleTheme,
            KeyCode::Char('?') => AppCommand::ShowHelp,
            _ => AppCommand::Noop,
        }
    }

    fn map_balance_input_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc => AppCommand::Dismiss,
            KeyCode::Enter => AppCommand::Submit,
            KeyCode::Backspace => AppCommand::Backspace,
            KeyCode::Char(c) => AppCommand::TypeChar(c),
            _ => AppCommand::Noop,
        }
    }

    fn map_help_keys(key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?') => AppCommand::Dismiss,
            _ => AppCommand::Noop,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
