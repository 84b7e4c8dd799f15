//! Theme and styling for the lazyvote TUI.
//!
//! Styling is an explicit value: the configured [`ThemeVariant`] resolves to a
//! [`Theme`] that the app owns and passes to every render function.

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

// ============================================================================
// Theme Variant
// ============================================================================

/// Selectable color schemes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// Tokyo Night-inspired colors on a dark terminal.
    #[default]
    Dark,
    /// Darker accents for light terminal backgrounds.
    Light,
    /// No colors; emphasis through modifiers only.
    Mono,
}

impl ThemeVariant {
    /// The next variant, cycling back to `Dark`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Mono,
            Self::Mono => Self::Dark,
        }
    }

    /// Lowercase name as written in the config file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Mono => "mono",
        }
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Resolved colors for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Which variant this theme was built from.
    pub variant: ThemeVariant,
    /// Primary accent - focused elements and highlights.
    pub primary: Color,
    /// Success indicator color.
    pub success: Color,
    /// Warning indicator color.
    pub warning: Color,
    /// Error indicator color.
    pub error: Color,
    /// Muted text color.
    pub muted: Color,
    /// Border color for unfocused elements.
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

impl Theme {
    /// Resolves a variant to concrete colors.
    #[must_use]
    pub const fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self {
                variant,
                primary: Color::Cyan,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                muted: Color::Gray,
                border: Color::DarkGray,
            },
            ThemeVariant::Light => Self {
                variant,
                primary: Color::Blue,
                success: Color::Rgb(0, 110, 40),
                warning: Color::Rgb(150, 90, 0),
                error: Color::Rgb(170, 20, 20),
                muted: Color::DarkGray,
                border: Color::Gray,
            },
            ThemeVariant::Mono => Self {
                variant,
                primary: Color::Reset,
                success: Color::Reset,
                warning: Color::Reset,
                error: Color::Reset,
                muted: Color::Reset,
                border: Color::Reset,
            },
        }
    }

    /// Border style for unfocused elements.
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    /// Border style for focused/active elements.
    #[must_use]
    pub fn focused_border_style(&self) -> Style {
        Style::new().fg(self.primary)
    }

    /// Title style for focused/active elements.
    #[must_use]
    pub fn focused_title_style(&self) -> Style {
        Style::new().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Style for the selected row of a list.
    #[must_use]
    pub fn selected_style(&self) -> Style {
        match self.variant {
            ThemeVariant::Mono => Style::new().add_modifier(Modifier::REVERSED),
            _ => Style::new()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        }
    }

    /// Style for secondary text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        match self.variant {
            ThemeVariant::Mono => Style::new().add_modifier(Modifier::DIM),
            _ => Style::new().fg(self.muted),
        }
    }

    /// Style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::new().fg(self.error).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_cycle_visits_all() {
        let start = ThemeVariant::Dark;
        assert_eq!(start.next(), ThemeVariant::Light);
        assert_eq!(start.next().next(), ThemeVariant::Mono);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeVariant::Mono).unwrap();
        assert_eq!(json, "\"mono\"");
        let parsed: ThemeVariant = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ThemeVariant::Light);
    }

    #[test]
    fn test_mono_uses_no_colors() {
        let theme = Theme::new(ThemeVariant::Mono);
        assert_eq!(theme.primary, Color::Reset);
        assert!(theme.selected_style().add_modifier.contains(Modifier::REVERSED));
    }
}
