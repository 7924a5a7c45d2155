//! Theme module for the scheduling board.
//!
//! Defines the `BoardTheme` palette and applies it to the egui context.

use egui::Color32;

/// Colors used across the board, toolbar and tray.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Panel and header background color
    pub panel_background: Color32,

    /// Grid row background color
    pub grid_background: Color32,

    /// Alternating grid row background color
    pub grid_alt_background: Color32,

    /// Quarter-hour separator color
    pub grid_line: Color32,

    /// Stronger separator at full hours
    pub hour_line: Color32,

    /// Primary text color
    pub text_primary: Color32,

    /// Secondary text color (axis labels, hints)
    pub text_muted: Color32,

    /// Accent for the hovered drop cell and selection feedback
    pub accent: Color32,
}

impl BoardTheme {
    /// Default light theme
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            panel_background: Color32::from_rgb(234, 238, 244),
            grid_background: Color32::from_rgb(255, 255, 255),
            grid_alt_background: Color32::from_rgb(248, 250, 252),
            grid_line: Color32::from_rgb(229, 231, 235),
            hour_line: Color32::from_rgb(203, 213, 225),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_muted: Color32::from_rgb(100, 110, 125),
            accent: Color32::from_rgb(0, 140, 180),
        }
    }

    /// Default dark theme, matching the board's deep-blue scheme.
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(15, 25, 35),
            panel_background: Color32::from_rgb(26, 37, 53),
            grid_background: Color32::from_rgb(26, 37, 53),
            grid_alt_background: Color32::from_rgb(30, 45, 66),
            grid_line: Color32::from_rgba_premultiplied(255, 255, 255, 8),
            hour_line: Color32::from_rgb(45, 63, 90),
            text_primary: Color32::from_rgb(232, 237, 245),
            text_muted: Color32::from_rgb(138, 155, 181),
            accent: Color32::from_rgb(0, 180, 216),
        }
    }

    /// Resolve a theme by its settings name, falling back to dark.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.panel_background;
        visuals.panel_fill = self.app_background;

        visuals.widgets.noninteractive.bg_fill = self.grid_background;
        visuals.widgets.inactive.bg_fill = self.panel_background;
        visuals.widgets.hovered.bg_fill = self.grid_alt_background;
        visuals.widgets.active.bg_fill = self.grid_alt_background;

        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_theme() {
        let theme = BoardTheme::light();
        assert!(!theme.is_dark);
    }

    #[test]
    fn test_dark_theme() {
        let theme = BoardTheme::dark();
        assert!(theme.is_dark);
        assert_eq!(theme.app_background, Color32::from_rgb(15, 25, 35));
    }

    #[test]
    fn test_from_name() {
        assert!(!BoardTheme::from_name("Light").is_dark);
        assert!(BoardTheme::from_name("dark").is_dark);
        assert!(BoardTheme::from_name("unknown").is_dark);
    }
}
