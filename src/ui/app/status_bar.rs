//! Bottom status bar: selected date, collection counts and activity.

use egui::RichText;

use super::BoardApp;

impl BoardApp {
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(self.target_date.format("%A, %d %B %Y").to_string()).size(11.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "{} staff · {} visits ({} unassigned)",
                        self.board.staff.len(),
                        self.board.assigned.len() + self.board.unassigned.len(),
                        self.board.unassigned.len()
                    ))
                    .size(11.0),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("v{}", env!("CARGO_PKG_VERSION"))).size(10.0),
                    );
                    ui.separator();
                    if self.loading {
                        ui.add(egui::Spinner::new().size(12.0));
                        ui.label(RichText::new("Loading...").size(11.0));
                    } else if !self.in_flight.is_empty() {
                        ui.add(egui::Spinner::new().size(12.0));
                        ui.label(RichText::new("Saving...").size(11.0));
                    }
                });
            });
        });
    }
}
