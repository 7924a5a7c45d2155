//! App construction and the per-frame update composition.

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use egui::RichText;

use super::data::DayBoard;
use super::toast::ToastManager;
use super::BoardApp;
use crate::models::settings::Settings;
use crate::services::api::ApiClient;
use crate::services::settings::SettingsService;
use crate::ui::drag::DragState;
use crate::ui::theme::BoardTheme;
use crate::ui::views::{board, tray, BoardPalette};
use crate::ui::visit_dialog::{render_visit_dialog, VisitDialogState};

impl BoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_service = SettingsService::new();
        let settings = load_settings_or_default(&settings_service);
        log::info!("Using backend at {}", settings.api_base_url);

        let api = ApiClient::new(
            settings.api_base_url.as_str(),
            Duration::from_secs(settings.request_timeout_secs),
        )
        .expect("Failed to build backend HTTP client");

        let active_theme = resolve_theme(&settings);
        active_theme.apply_to_context(&cc.egui_ctx);

        let (events_tx, events_rx) = mpsc::channel();
        let today = Local::now().date_naive();

        let mut app = Self {
            api: Arc::new(api),
            settings,
            active_theme,
            target_date: today,
            board: DayBoard::empty(today),
            drag: DragState::default(),
            in_flight: HashSet::new(),
            loading: false,
            events_tx,
            events_rx,
            toasts: ToastManager::new(),
            visit_dialog: None,
        };

        app.spawn_day_load(&cc.egui_ctx);
        app
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);

        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        self.render_tray_panel(ctx);
        self.render_central_panel(ctx);
        self.render_visit_dialog(ctx);

        // Toasts last, so they stack on top of everything
        let is_dark = self.active_theme.is_dark;
        self.toasts.render(ctx, is_dark);
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        let previous_date = self.target_date;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("care-board").strong().size(15.0));
                ui.separator();

                if ui.button("◀").clicked() {
                    self.target_date = self.target_date - chrono::Duration::days(1);
                }
                ui.add(egui_extras::DatePickerButton::new(&mut self.target_date));
                if ui.button("▶").clicked() {
                    self.target_date = self.target_date + chrono::Duration::days(1);
                }
                if ui.button("Today").clicked() {
                    self.target_date = Local::now().date_naive();
                }

                ui.separator();
                if ui.button("⟳ Reload").clicked() {
                    self.spawn_day_load(ctx);
                }
            });

            // Day completion bar, colored by the rate thresholds the
            // coordinators work to.
            let progress = self.board.progress;
            if progress.total > 0 {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "Completed {}/{}",
                            progress.completed, progress.total
                        ))
                        .size(11.0),
                    );
                    let rate = progress.rate();
                    let color = if rate >= 80.0 {
                        egui::Color32::from_rgb(0x27, 0xAE, 0x60)
                    } else if rate >= 50.0 {
                        egui::Color32::from_rgb(0xF3, 0x9C, 0x12)
                    } else {
                        egui::Color32::from_rgb(0xE7, 0x4C, 0x3C)
                    };
                    ui.add(
                        egui::ProgressBar::new(rate / 100.0)
                            .fill(color)
                            .text(RichText::new(format!("{:.0}%", rate)).size(10.0)),
                    );
                });
            }
            ui.add_space(4.0);
        });

        if self.target_date != previous_date {
            self.on_date_changed(ctx);
        }
    }

    /// A date switch abandons any gesture and dialog from the old day and
    /// refreshes from the backend.
    fn on_date_changed(&mut self, ctx: &egui::Context) {
        self.drag.cancel();
        self.visit_dialog = None;
        self.spawn_day_load(ctx);
    }

    fn render_tray_panel(&mut self, ctx: &egui::Context) {
        let palette = BoardPalette::from_theme(&self.active_theme);

        egui::SidePanel::right("unassigned_tray")
            .resizable(false)
            .default_width(210.0)
            .show(ctx, |ui| {
                if let Some(visit) = tray::render_tray(ui, &self.board.unassigned, &palette) {
                    self.visit_dialog = Some(VisitDialogState::for_visit(&visit));
                }
            });
    }

    fn render_central_panel(&mut self, ctx: &egui::Context) {
        let palette = BoardPalette::from_theme(&self.active_theme);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.loading && self.board.staff.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Loading schedule...").color(palette.text_muted));
                });
                return;
            }

            let interaction = board::render_board(
                ui,
                &self.board,
                &mut self.drag,
                &self.in_flight,
                &palette,
            );

            ui.add_space(4.0);
            board::render_legend(ui, &palette);

            if let Some(intent) = interaction.intent {
                self.spawn_reschedule(ctx, intent);
            }
            if let Some(visit) = interaction.open_visit {
                self.visit_dialog = Some(VisitDialogState::for_visit(&visit));
            }
        });
    }

    fn render_visit_dialog(&mut self, ctx: &egui::Context) {
        let (submitted, closed) = {
            let Some(state) = self.visit_dialog.as_mut() else {
                return;
            };
            let mut open = true;
            let result = render_visit_dialog(ctx, state, &self.board.staff, &mut open);
            (result.submitted, !open)
        };

        if let Some((visit_id, change)) = submitted {
            self.visit_dialog = None;
            self.spawn_visit_update(ctx, visit_id, change);
        } else if closed {
            self.visit_dialog = None;
        }
    }
}

fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.load() {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("Failed to load settings: {:#}, using defaults", err);
            Settings::default()
        }
    }
}

fn resolve_theme(settings: &Settings) -> BoardTheme {
    if settings.use_system_theme {
        match dark_light::detect() {
            dark_light::Mode::Dark => BoardTheme::dark(),
            dark_light::Mode::Light => BoardTheme::light(),
            dark_light::Mode::Default => BoardTheme::from_name(&settings.theme),
        }
    } else {
        BoardTheme::from_name(&settings.theme)
    }
}
