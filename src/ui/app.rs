pub mod data;
mod lifecycle;
mod status_bar;
pub mod toast;

use std::collections::HashSet;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use chrono::NaiveDate;

use self::data::{AppEvent, DayBoard};
use self::toast::ToastManager;
use crate::models::settings::Settings;
use crate::services::api::ScheduleApi;
use crate::ui::drag::DragState;
use crate::ui::theme::BoardTheme;
use crate::ui::visit_dialog::VisitDialogState;

/// The scheduling dashboard application.
pub struct BoardApp {
    /// Backend access shared with worker threads
    api: Arc<dyn ScheduleApi>,
    #[allow(dead_code)]
    settings: Settings,
    /// Currently applied theme colors
    active_theme: BoardTheme,
    /// The day being coordinated
    target_date: NaiveDate,
    /// Derived view of the day, rebuilt wholesale on every load
    board: DayBoard,
    /// Drag gesture state machine
    drag: DragState,
    /// Visits with an outstanding reschedule request; their blocks cannot be
    /// grabbed again until the backend answers
    in_flight: HashSet<String>,
    loading: bool,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
    toasts: ToastManager,
    /// Open visit detail dialog, if any
    visit_dialog: Option<VisitDialogState>,
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }
}
