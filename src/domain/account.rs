//! Account selection and token amount types.
//!
//! The dashboard lets the user pick one of a fixed set of local node accounts
//! and records token balances reported for it. Both values arrive from user
//! input, so both are validated newtypes.

use std::fmt;
use std::str::FromStr;

use super::error::DashboardError;

// ============================================================================
// Constants
// ============================================================================

/// Number of entries in the account selector (indices `0..=8`).
pub const ACCOUNT_SLOTS: u8 = 9;

// ============================================================================
// Account Index
// ============================================================================

/// Index into the unlocked accounts of the local node.
///
/// Always within `0..ACCOUNT_SLOTS`. Whether the node actually exposes that
/// many accounts is not checked here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountIndex(u8);

impl AccountIndex {
    /// The first selectable account.
    pub const FIRST: Self = Self(0);
    /// The last selectable account.
    pub const LAST: Self = Self(ACCOUNT_SLOTS - 1);

    /// Creates an index, rejecting values outside the selector domain.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidAccount`] for values outside `0..=8`.
    pub fn new(value: i64) -> Result<Self, DashboardError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v < ACCOUNT_SLOTS)
            .map(Self)
            .ok_or(DashboardError::InvalidAccount(value))
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the index as a `usize` for slice lookups.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The next index, wrapping from 8 back to 0.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % ACCOUNT_SLOTS)
    }

    /// The previous index, wrapping from 0 to 8.
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.0 == 0 {
            Self::LAST
        } else {
            Self(self.0 - 1)
        }
    }

    /// Iterates over every selectable index in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ACCOUNT_SLOTS).map(Self)
    }
}

impl fmt::Display for AccountIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Token Amount
// ============================================================================

/// A token balance in base units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(u128);

impl TokenAmount {
    /// Wraps a raw base-unit amount.
    #[must_use]
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// Returns the raw base-unit amount.
    #[must_use]
    pub const fn units(self) -> u128 {
        self.0
    }

    /// Formats the amount with `,` thousands separators.
    #[must_use]
    pub fn grouped(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl FromStr for TokenAmount {
    type Err = DashboardError;

    /// Parses a whole, non-negative amount. `_` and `,` separators are accepted.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DashboardError::invalid_balance(input, "empty"));
        }
        if trimmed.starts_with('-') {
            return Err(DashboardError::invalid_balance(input, "negative"));
        }
        if trimmed.contains('.') {
            return Err(DashboardError::invalid_balance(
                input,
                "fractional amounts are not supported",
            ));
        }

        let digits: String = trimmed.chars().filter(|c| !matches!(c, '_' | ',')).collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DashboardError::invalid_balance(input, "not a number"));
        }

        digits
            .parse::<u128>()
            .map(Self)
            .map_err(|_| DashboardError::invalid_balance(input, "too large"))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
