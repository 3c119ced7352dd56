//! Theme colors for the dropdown and the surrounding demo screen.
//! Overrides come from the `[theme]` table of the config file.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,      // Open trigger border, list border, hover marker
    pub text: Color,        // Trigger title and option titles
    pub text_dim: Color,    // Hints, footer
    pub bg_selected: Color, // Hovered option background
    pub inactive: Color,    // Closed trigger border
    pub header: Color,      // Chosen option marker
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallback
        Self {
            accent: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            bg_selected: Color::Rgb(69, 71, 90),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(243, 139, 168),
        }
    }
}

/// Color overrides as written in the config file.
///
/// Any string ratatui's `Color` parses is accepted: `red`, `#fab387`, `208`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_selected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl Theme {
    /// Default theme with the given overrides applied
    pub fn load(overrides: &ThemeOverrides) -> Self {
        let mut theme = Self::default();
        apply(&mut theme.accent, "accent", overrides.accent.as_deref());
        apply(&mut theme.text, "text", overrides.text.as_deref());
        apply(&mut theme.text_dim, "text_dim", overrides.text_dim.as_deref());
        apply(&mut theme.bg_selected, "bg_selected", overrides.bg_selected.as_deref());
        apply(&mut theme.inactive, "inactive", overrides.inactive.as_deref());
        apply(&mut theme.header, "header", overrides.header.as_deref());
        theme
    }
}

fn apply(slot: &mut Color, key: &str, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    match Color::from_str(value.trim()) {
        Ok(color) => *slot = color,
        Err(_) => tracing::warn!("Ignoring unknown theme color {} = {:?}", key, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_colors() {
        let overrides = ThemeOverrides {
            accent: Some("#ff0000".to_string()),
            text: Some("blue".to_string()),
            ..Default::default()
        };
        let theme = Theme::load(&overrides);

        assert_eq!(theme.accent, Color::Rgb(255, 0, 0));
        assert_eq!(theme.text, Color::Blue);
        assert_eq!(theme.inactive, Theme::default().inactive);
    }

    #[test]
    fn test_unknown_color_keeps_default() {
        let overrides = ThemeOverrides {
            header: Some("not-a-color".to_string()),
            ..Default::default()
        };
        assert_eq!(Theme::load(&overrides).header, Theme::default().header);
    }
}
