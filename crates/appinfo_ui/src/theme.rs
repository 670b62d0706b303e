//! Theme definitions for App Info.

use appinfo_core::ThemePreference;
use gpui::{hsla, Global, Hsla, WindowAppearance};

/// Color palette for UI rendering.
///
/// All colors use GPUI's `Hsla` type (Hue, Saturation, Lightness, Alpha).
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Window background color.
    pub background: Hsla,
    /// Card background behind the info rows.
    pub surface: Hsla,
    /// Primary text color.
    pub text: Hsla,
    /// Field captions and secondary text.
    pub text_muted: Hsla,
    /// Divider between rows.
    pub border: Hsla,
    /// Primary accent color.
    pub accent: Hsla,
    /// Accent hover state.
    pub accent_hover: Hsla,
    /// Text drawn on top of the accent color.
    pub on_accent: Hsla,
    /// Secondary button background.
    pub element_background: Hsla,
    /// Secondary button hover background.
    pub element_hover: Hsla,
}

impl ThemeColors {
    /// Create the dark theme color palette.
    ///
    /// Based on Catppuccin Mocha palette.
    pub fn dark() -> Self {
        Self {
            // #1e1e2e - Mocha Base
            background: hsla(240.0 / 360.0, 0.21, 0.15, 1.0),
            // #313244 - Mocha Surface0
            surface: hsla(237.0 / 360.0, 0.16, 0.23, 1.0),
            // #cdd6f4 - Mocha Text
            text: hsla(226.0 / 360.0, 0.64, 0.88, 1.0),
            // #a6adc8 - Mocha Subtext0
            text_muted: hsla(228.0 / 360.0, 0.24, 0.72, 1.0),
            // #45475a - Mocha Surface1
            border: hsla(233.0 / 360.0, 0.13, 0.31, 1.0),
            // #89b4fa - Mocha Blue
            accent: hsla(217.0 / 360.0, 0.92, 0.76, 1.0),
            // #b4befe - Mocha Lavender
            accent_hover: hsla(232.0 / 360.0, 0.97, 0.85, 1.0),
            // #11111b - Mocha Crust
            on_accent: hsla(240.0 / 360.0, 0.23, 0.09, 1.0),
            // #45475a - Mocha Surface1
            element_background: hsla(233.0 / 360.0, 0.13, 0.31, 1.0),
            // #585b70 - Mocha Surface2
            element_hover: hsla(233.0 / 360.0, 0.12, 0.39, 1.0),
        }
    }

    /// Create the light theme color palette.
    ///
    /// Based on Catppuccin Latte palette.
    pub fn light() -> Self {
        Self {
            // #eff1f5 - Latte Base
            background: hsla(220.0 / 360.0, 0.23, 0.95, 1.0),
            // #e6e9ef - Latte Mantle
            surface: hsla(220.0 / 360.0, 0.21, 0.92, 1.0),
            // #4c4f69 - Latte Text
            text: hsla(234.0 / 360.0, 0.16, 0.35, 1.0),
            // #6c6f85 - Latte Subtext0
            text_muted: hsla(233.0 / 360.0, 0.10, 0.47, 1.0),
            // #ccd0da - Latte Surface0
            border: hsla(223.0 / 360.0, 0.16, 0.83, 1.0),
            // #1e66f5 - Latte Blue
            accent: hsla(220.0 / 360.0, 0.91, 0.54, 1.0),
            // #7287fd - Latte Lavender
            accent_hover: hsla(231.0 / 360.0, 0.97, 0.72, 1.0),
            // #eff1f5 - Latte Base
            on_accent: hsla(220.0 / 360.0, 0.23, 0.95, 1.0),
            // #ccd0da - Latte Surface0
            element_background: hsla(223.0 / 360.0, 0.16, 0.83, 1.0),
            // #bcc0cc - Latte Surface1
            element_hover: hsla(225.0 / 360.0, 0.14, 0.77, 1.0),
        }
    }
}

/// Theme configuration for application styling.
#[derive(Debug, Clone)]
pub struct AppTheme {
    /// Theme identifier.
    pub name: String,
    /// GPUI appearance (Light/Dark).
    pub appearance: WindowAppearance,
    /// Color palette.
    pub colors: ThemeColors,
}

impl AppTheme {
    /// Create a new dark theme.
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            appearance: WindowAppearance::Dark,
            colors: ThemeColors::dark(),
        }
    }

    /// Create a new light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            appearance: WindowAppearance::Light,
            colors: ThemeColors::light(),
        }
    }

    /// Theme matching a configured preference.
    pub fn from_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Dark => Self::dark(),
            ThemePreference::Light => Self::light(),
        }
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Global for AppTheme {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_preference() {
        assert_eq!(AppTheme::from_preference(ThemePreference::Light).name, "light");
        assert_eq!(AppTheme::from_preference(ThemePreference::Dark).name, "dark");
        assert_eq!(AppTheme::default().name, "dark");
    }
}
