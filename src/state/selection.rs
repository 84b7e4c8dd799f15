//! UI-local selection state for the dashboard.
//!
//! [`UiSelectionState`] is the only writable state below the readiness gate.
//! It holds the selected account slot and the last token balances reported
//! for the user. Every mutation validates its input and leaves the state
//! untouched on error.

use crate::domain::{AccountIndex, DashboardError, TokenAmount};

/// Selected account and cached balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiSelectionState {
    current_account: AccountIndex,
    token_balance: Option<TokenAmount>,
    staked_token_balance: Option<TokenAmount>,
}

impl UiSelectionState {
    /// Account 0, no balances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    #[must_use]
    pub fn current_account(&self) -> AccountIndex {
        self.current_account
    }

    #[must_use]
    pub fn token_balance(&self) -> Option<TokenAmount> {
        self.token_balance
    }

    #[must_use]
    pub fn staked_token_balance(&self) -> Option<TokenAmount> {
        self.staked_token_balance
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Selects the account slot `value`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidAccount`] if `value` is outside `0..=8`.
    pub fn account_change(&mut self, value: i64) -> Result<AccountIndex, DashboardError> {
        let index = AccountIndex::new(value)?;
        if index != self.current_account {
            tracing::debug!(from = %self.current_account, to = %index, "account changed");
        }
        self.current_account = index;
        Ok(index)
    }

    /// Replaces the token balance with the amount parsed from `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidBalance`] if `raw` is not a whole,
    /// non-negative amount.
    pub fn change_token_balance(&mut self, raw: &str) -> Result<TokenAmount, DashboardError> {
        let amount: TokenAmount = raw.parse()?;
        self.token_balance = Some(amount);
        Ok(amount)
    }

    /// Replaces the staked token balance with the amount parsed from `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidBalance`] if `raw` is not a whole,
    /// non-negative amount.
    pub fn change_staked_token(&mut self, raw: &str) -> Result<TokenAmount, DashboardError> {
        let amount: TokenAmount = raw.parse()?;
        self.staked_token_balance = Some(amount);
        Ok(amount)
    }

    /// Selects the next slot, wrapping after 8.
    pub fn select_next(&mut self) -> AccountIndex {
        let to = self.current_account.next();
        tracing::debug!(from = %self.current_account, to = %to, "account changed");
        self.current_account = to;
        to
    }

    /// Selects the previous slot, wrapping before 0.
    pub fn select_prev(&mut self) -> AccountIndex {
        let to = self.current_account.prev();
        tracing::debug!(from = %self.current_account, to = %to, "account changed");
        self.current_account = to;
        to
    }
}

// ============================================================================
// Tests
// ============================================================================
