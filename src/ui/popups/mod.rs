//! Popup UI components for the lazyvote TUI.
//!
//! Popups are modal overlays drawn on top of the dashboard; while one is open
//! it owns the keyboard.

pub mod balance_input;
pub mod help;
