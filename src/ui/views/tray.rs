//! Unassigned visit tray.
//!
//! Visits without a staff reference never appear on the grid; they wait here
//! until a coordinator assigns them through the visit dialog.

use egui::{RichText, Stroke};

use super::palette::{service_color, BoardPalette};
use crate::models::visit::Visit;

/// Render the tray contents. Returns the visit whose card was clicked.
pub fn render_tray(
    ui: &mut egui::Ui,
    unassigned: &[Visit],
    palette: &BoardPalette,
) -> Option<Visit> {
    let mut clicked = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Unassigned").strong().size(13.0));
        let badge = if unassigned.is_empty() {
            RichText::new("0")
                .size(11.0)
                .color(egui::Color32::from_rgb(0x27, 0xAE, 0x60))
        } else {
            RichText::new(unassigned.len().to_string())
                .size(11.0)
                .color(egui::Color32::from_rgb(0xE7, 0x4C, 0x3C))
        };
        ui.label(badge);
    });
    ui.separator();

    if unassigned.is_empty() {
        ui.label(
            RichText::new("Everything assigned ✓")
                .size(11.0)
                .color(palette.text_muted),
        );
        return None;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for visit in unassigned {
                let color = service_color(visit.service);
                let frame = egui::Frame::none()
                    .fill(palette.row_alt_bg)
                    .stroke(Stroke::new(1.0, palette.hour_line))
                    .rounding(6.0)
                    .inner_margin(egui::Margin::same(8.0));

                let response = frame
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.label(RichText::new(visit.client_label()).size(12.0).strong());
                        ui.label(
                            RichText::new(format!(
                                "{} {}min",
                                visit.service.label(),
                                visit.duration_minutes()
                            ))
                            .size(11.0)
                            .color(color),
                        );
                        ui.label(
                            RichText::new(format!(
                                "{} – {}",
                                visit.scheduled_start.format("%H:%M"),
                                visit.scheduled_end.format("%H:%M")
                            ))
                            .size(10.0)
                            .color(palette.text_muted),
                        );
                    })
                    .response;

                if response.interact(egui::Sense::click()).clicked() {
                    clicked = Some(visit.clone());
                }
                ui.add_space(6.0);
            }
        });

    clicked
}
