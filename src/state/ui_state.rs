//! UI presentation state: popups and toast notifications.

use crate::domain::{DashboardError, TokenAmount};
use crate::state::selection::UiSelectionState;

// ============================================================================
// Balance Field
// ============================================================================

/// Which cached balance an input popup edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceField {
    /// Spendable token balance.
    Token,
    /// Staked token balance.
    Staked,
}

impl BalanceField {
    /// Popup title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Token => "Token Balance",
            Self::Staked => "Staked Tokens",
        }
    }

    /// Routes `raw` to the matching selection-state operation.
    ///
    /// # Errors
    ///
    /// Propagates the validation error of the underlying operation.
    pub fn apply(
        self,
        selection: &mut UiSelectionState,
        raw: &str,
    ) -> Result<TokenAmount, DashboardError> {
        match self {
            Self::Token => selection.change_token_balance(raw),
            Self::Staked => selection.change_staked_token(raw),
        }
    }
}

// ============================================================================
// Popup State
// ============================================================================

/// State for popups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PopupState {
    /// No popup.
    #[default]
    None,
    /// Editing a balance.
    BalanceInput {
        /// Balance being edited.
        field: BalanceField,
        /// Text typed so far.
        input: String,
        /// Validation error of the last submit, if any.
        error: Option<String>,
    },
    /// Key binding help.
    Help,
}

impl PopupState {
    /// Opens an empty balance input.
    #[must_use]
    pub fn balance_input(field: BalanceField) -> Self {
        Self::BalanceInput {
            field,
            input: String::new(),
            error: None,
        }
    }

    /// Returns `true` if a popup is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

// ============================================================================
// UI State
// ============================================================================

/// Popup and toast state.
#[derive(Debug, Default)]
pub struct UiState {
    /// Current popup/modal state.
    pub popup_state: PopupState,
    /// Toast notification message and remaining ticks (non-blocking overlay).
    pub toast: Option<(String, u8)>,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a popup is open.
    #[must_use]
    pub fn has_active_popup(&self) -> bool {
        self.popup_state.is_active()
    }

    /// Closes any popup.
    pub fn dismiss_popup(&mut self) {
        self.popup_state = PopupState::None;
    }

    /// Appends a character to the balance input, if one is open.
    pub fn push_char(&mut self, c: char) {
        if let PopupState::BalanceInput { input, error, .. } = &mut self.popup_state {
            input.push(c);
            *error = None;
        }
    }

    /// Removes the last character of the balance input, if one is open.
    pub fn pop_char(&mut self) {
        if let PopupState::BalanceInput { input, error, .. } = &mut self.popup_state {
            input.pop();
            *error = None;
        }
    }

    // ========================================================================
    // Toast Notifications
    // ========================================================================

    /// Shows a toast notification.
    ///
    /// Duration is in ticks (each tick is ~100ms in the main loop).
    pub fn show_toast(&mut self, message: impl Into<String>, ticks: u8) {
        self.toast = Some((message.into(), ticks));
    }

    /// Decrements the toast countdown.
    ///
    /// Returns `true` if the toast was removed.
    pub fn tick_toast(&mut self) -> bool {
        if let Some((_, ref mut ticks)) = self.toast {
            if *ticks > 1 {
                *ticks -= 1;
                false
            } else {
                self.toast = None;
                true
            }
        } else {
            false
        }
    }

    /// Gets the current toast message.
    #[must_use]
    pub fn toast_message(&self) -> Option<&str> {
        self.toast.as_ref().map(|(msg, _)| msg.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
