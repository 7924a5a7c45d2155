//! Color assignments for the board: service categories, capacity bands and
//! status feedback, plus the theme-derived grid palette.

use egui::Color32;

use crate::models::roster::CapacityBand;
use crate::models::visit::{ServiceKind, VisitStatus};
use crate::ui::theme::BoardTheme;

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Block color per service category.
pub fn service_color(service: ServiceKind) -> Color32 {
    match service {
        ServiceKind::PersonalCare => Color32::from_rgb(0x34, 0x98, 0xDB),
        ServiceKind::Housework => Color32::from_rgb(0x27, 0xAE, 0x60),
        ServiceKind::LifeSupport => Color32::from_rgb(0x8E, 0x44, 0xAD),
        ServiceKind::IntensiveCare => Color32::from_rgb(0xE7, 0x4C, 0x3C),
        ServiceKind::DisabilitySupport => Color32::from_rgb(0xE6, 0x7E, 0x22),
    }
}

/// Indicator color per capacity band.
pub fn capacity_color(band: CapacityBand) -> Color32 {
    match band {
        CapacityBand::Normal => Color32::from_rgb(0x27, 0xAE, 0x60),
        CapacityBand::NearLimit => Color32::from_rgb(0xF3, 0x9C, 0x12),
        CapacityBand::Over => Color32::from_rgb(0xE7, 0x4C, 0x3C),
    }
}

/// Accent color per visit status, used by the dialog's status buttons.
pub fn status_color(status: VisitStatus) -> Color32 {
    match status {
        VisitStatus::Scheduled => Color32::from_rgb(0x8A, 0x9B, 0xB5),
        VisitStatus::Completed => Color32::from_rgb(0x27, 0xAE, 0x60),
        VisitStatus::Cancelled => Color32::from_rgb(0xE7, 0x4C, 0x3C),
        VisitStatus::NotPerformed => Color32::from_rgb(0xF3, 0x9C, 0x12),
    }
}

/// Outline for two-staff visits.
pub fn two_staff_accent() -> Color32 {
    Color32::from_rgb(0xF3, 0x9C, 0x12)
}

/// Outline for accompany visits.
pub fn accompany_accent() -> Color32 {
    Color32::from_rgb(0x95, 0xA5, 0xA6)
}

/// Colors the grid painter needs, resolved once per frame from the theme.
#[derive(Clone, Copy)]
pub(crate) struct BoardPalette {
    pub header_bg: Color32,
    pub row_bg: Color32,
    pub row_alt_bg: Color32,
    pub grid_line: Color32,
    pub hour_line: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub drop_fill: Color32,
    pub drop_stroke: Color32,
    pub block_text: Color32,
}

impl BoardPalette {
    pub fn from_theme(theme: &BoardTheme) -> Self {
        Self {
            header_bg: theme.panel_background,
            row_bg: theme.grid_background,
            row_alt_bg: theme.grid_alt_background,
            grid_line: theme.grid_line,
            hour_line: theme.hour_line,
            text: theme.text_primary,
            text_muted: theme.text_muted,
            drop_fill: with_alpha(theme.accent, 30),
            drop_stroke: theme.accent,
            block_text: Color32::WHITE,
        }
    }
}
