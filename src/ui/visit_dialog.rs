//! Visit detail dialog.
//!
//! Opened by clicking a block or a tray entry. Shows the visit's schedule and
//! lets the coordinator record outcomes: status, actual times, staffing mode
//! with companion, and the bounded note. Saving submits one sparse update
//! through the visit service; scheduling itself is changed by dragging, not
//! here.

use chrono::{NaiveTime, TimeZone};
use egui::{Color32, RichText};

use crate::models::staff::Staff;
use crate::models::visit::{Visit, VisitMode, VisitStatus, NOTE_MAX_CHARS};
use crate::services::visit::VisitChange;
use crate::ui::views::palette::status_color;

pub struct VisitDialogState {
    pub visit: Visit,
    status: VisitStatus,
    mode: VisitMode,
    companion_id: Option<String>,
    actual_start: String,
    actual_end: String,
    note: String,
    validation_error: Option<String>,
}

impl VisitDialogState {
    pub fn for_visit(visit: &Visit) -> Self {
        Self {
            status: visit.status,
            mode: visit.mode,
            companion_id: visit.companion_staff_id.clone(),
            actual_start: visit
                .actual_start
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            actual_end: visit
                .actual_end
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            note: visit.note.clone(),
            validation_error: None,
            visit: visit.clone(),
        }
    }

    /// Assemble the sparse update, or record why it cannot be built yet.
    fn build_change(&mut self) -> Option<VisitChange> {
        let actual_start = match parse_actual_time(&self.visit, &self.actual_start) {
            Ok(value) => value,
            Err(err) => {
                self.validation_error = Some(format!("Actual start: {}", err));
                return None;
            }
        };
        let actual_end = match parse_actual_time(&self.visit, &self.actual_end) {
            Ok(value) => value,
            Err(err) => {
                self.validation_error = Some(format!("Actual end: {}", err));
                return None;
            }
        };

        if self.mode == VisitMode::TwoStaff && self.companion_id.is_none() {
            self.validation_error =
                Some("Two-staff visits need a companion staff member".to_string());
            return None;
        }

        self.validation_error = None;
        Some(VisitChange {
            status: Some(self.status),
            note: Some(self.note.clone()),
            mode: Some(self.mode),
            companion_staff_id: Some(if self.mode == VisitMode::Normal {
                None
            } else {
                self.companion_id.clone()
            }),
            actual_start,
            actual_end,
            ..VisitChange::default()
        })
    }
}

/// Parse an `HH:MM` field into an instant on the visit's date. Empty input
/// means the field is left unset.
fn parse_actual_time(
    visit: &Visit,
    input: &str,
) -> Result<Option<chrono::DateTime<chrono::Local>>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| format!("'{}' is not an HH:MM time", trimmed))?;
    let instant = chrono::Local
        .from_local_datetime(&visit.date.and_time(time))
        .single()
        .ok_or_else(|| format!("'{}' is not a valid local time", trimmed))?;
    Ok(Some(instant))
}

#[derive(Default)]
pub struct VisitDialogResult {
    /// `(visit id, change)` when the user saved.
    pub submitted: Option<(String, VisitChange)>,
}

pub fn render_visit_dialog(
    ctx: &egui::Context,
    state: &mut VisitDialogState,
    staff: &[Staff],
    open: &mut bool,
) -> VisitDialogResult {
    let mut result = VisitDialogResult::default();
    let mut save_clicked = false;
    let mut cancel_clicked = false;

    egui::Window::new(state.visit.client_label())
        .id(egui::Id::new(("visit-dialog", state.visit.id.as_str())))
        .open(open)
        .collapsible(false)
        .resizable(false)
        .default_width(340.0)
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!(
                    "{} – {}  ({} min) · {}",
                    state.visit.scheduled_start.format("%H:%M"),
                    state.visit.scheduled_end.format("%H:%M"),
                    state.visit.duration_minutes(),
                    state.visit.service.label(),
                ))
                .size(12.0),
            );
            if let Some(staff_id) = &state.visit.staff_id {
                let name = staff
                    .iter()
                    .find(|member| &member.id == staff_id)
                    .map(|member| member.name.as_str())
                    .unwrap_or("(unknown)");
                ui.label(RichText::new(format!("Assigned to {}", name)).size(12.0));
            } else {
                ui.label(RichText::new("Unassigned").size(12.0).italics());
            }
            ui.separator();

            ui.label(RichText::new("Status").size(11.0).strong());
            ui.horizontal(|ui| {
                for status in VisitStatus::ALL {
                    let selected = state.status == status;
                    let text = if selected {
                        RichText::new(status.label()).color(status_color(status)).strong()
                    } else {
                        RichText::new(status.label())
                    };
                    if ui.selectable_label(selected, text).clicked() {
                        state.status = status;
                    }
                }
            });
            ui.add_space(6.0);

            ui.label(RichText::new("Actual times").size(11.0).strong());
            ui.horizontal(|ui| {
                ui.label("start");
                ui.add(
                    egui::TextEdit::singleline(&mut state.actual_start)
                        .hint_text("HH:MM")
                        .desired_width(60.0),
                );
                ui.label("end");
                ui.add(
                    egui::TextEdit::singleline(&mut state.actual_end)
                        .hint_text("HH:MM")
                        .desired_width(60.0),
                );
            });
            ui.add_space(6.0);

            ui.label(RichText::new("Staffing").size(11.0).strong());
            ui.horizontal(|ui| {
                for mode in [VisitMode::Normal, VisitMode::TwoStaff, VisitMode::Accompany] {
                    if ui
                        .selectable_label(state.mode == mode, mode.label())
                        .clicked()
                    {
                        state.mode = mode;
                    }
                }
            });
            if state.mode != VisitMode::Normal {
                let current = state
                    .companion_id
                    .as_ref()
                    .and_then(|id| staff.iter().find(|member| &member.id == id))
                    .map(|member| member.name.clone())
                    .unwrap_or_else(|| "Select companion...".to_string());

                egui::ComboBox::from_id_source("companion-staff")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for member in staff {
                            // The companion must differ from the assigned staff
                            if Some(&member.id) == state.visit.staff_id.as_ref() {
                                continue;
                            }
                            let selected = state.companion_id.as_ref() == Some(&member.id);
                            if ui.selectable_label(selected, &member.name).clicked() {
                                state.companion_id = Some(member.id.clone());
                            }
                        }
                    });
            }
            ui.add_space(6.0);

            ui.label(RichText::new("Note").size(11.0).strong());
            ui.add(
                egui::TextEdit::multiline(&mut state.note)
                    .desired_rows(3)
                    .char_limit(NOTE_MAX_CHARS)
                    .desired_width(f32::INFINITY),
            );

            if let Some(error) = &state.validation_error {
                ui.colored_label(Color32::from_rgb(0xE7, 0x4C, 0x3C), error);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save_clicked = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel_clicked = true;
                }
            });
        });

    if save_clicked {
        if let Some(change) = state.build_change() {
            result.submitted = Some((state.visit.id.clone(), change));
        }
    }
    if cancel_clicked {
        *open = false;
    }

    result
}
