//! Day data lifecycle: the derived day board, background backend calls, and
//! the rescheduling protocol's success/failure reconciliation.
//!
//! All derived state here is rebuilt from scratch from the backend
//! collections on every load; nothing is patched incrementally, so a refresh
//! can never leave stale derivations behind.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

use super::BoardApp;
use crate::models::roster::{DayProgress, RosterIndex};
use crate::models::staff::Staff;
use crate::models::visit::Visit;
use crate::services::api::{ApiError, ScheduleApi};
use crate::services::staff::StaffService;
use crate::services::visit::{VisitChange, VisitService};
use crate::ui::drag::RescheduleIntent;

/// Raw collections fetched from the backend for one date.
pub struct DaySnapshot {
    pub staff: Vec<Staff>,
    pub visits: Vec<Visit>,
}

/// Results delivered from worker threads to the update loop.
pub enum AppEvent {
    DayLoaded {
        date: NaiveDate,
        result: Result<DaySnapshot, ApiError>,
    },
    RescheduleResolved {
        visit_id: String,
        result: Result<Visit, ApiError>,
    },
    VisitSaved {
        visit_id: String,
        result: Result<Visit, ApiError>,
    },
}

/// Render-local view of one day: the staff rows, the assigned/unassigned
/// split, the per-staff assignment index and the progress summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBoard {
    pub date: NaiveDate,
    pub staff: Vec<Staff>,
    pub assigned: Vec<Visit>,
    pub unassigned: Vec<Visit>,
    pub roster: RosterIndex,
    pub progress: DayProgress,
}

impl DayBoard {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Derive the board from fresh backend collections. Visits referencing a
    /// staff member that is not listed stay in the unassigned tray instead of
    /// disappearing.
    pub fn from_snapshot(date: NaiveDate, staff: Vec<Staff>, visits: Vec<Visit>) -> Self {
        let progress = DayProgress::of(&visits);

        let known: HashSet<&str> = staff.iter().map(|member| member.id.as_str()).collect();
        let (assigned, unassigned): (Vec<Visit>, Vec<Visit>) = visits.into_iter().partition(|v| {
            v.staff_id
                .as_deref()
                .map(|id| known.contains(id))
                .unwrap_or(false)
        });

        let roster = RosterIndex::build(&staff, &assigned);

        Self {
            date,
            staff,
            assigned,
            unassigned,
            roster,
            progress,
        }
    }

    pub fn visit(&self, visit_id: &str) -> Option<&Visit> {
        self.assigned
            .iter()
            .chain(self.unassigned.iter())
            .find(|v| v.id == visit_id)
    }
}

impl BoardApp {
    /// Fetch the staff list and the day's visits on a worker thread.
    pub(super) fn spawn_day_load(&mut self, ctx: &egui::Context) {
        let api: Arc<dyn ScheduleApi> = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        let date = self.target_date;

        self.loading = true;
        log::debug!("Loading schedule for {}", date);

        thread::spawn(move || {
            let result = (|| {
                let staff = StaffService::new(api.as_ref()).list()?;
                let visits = VisitService::new(api.as_ref()).list(date)?;
                Ok(DaySnapshot { staff, visits })
            })();

            if tx.send(AppEvent::DayLoaded { date, result }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Submit a completed drop. No local state changes until the backend
    /// answers; the grid keeps showing the pre-drag placement meanwhile.
    pub(super) fn spawn_reschedule(&mut self, ctx: &egui::Context, intent: RescheduleIntent) {
        if !self.in_flight.insert(intent.visit_id.clone()) {
            log::warn!(
                "Dropping reschedule for {}: a request is already outstanding",
                intent.visit_id
            );
            return;
        }

        let api: Arc<dyn ScheduleApi> = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let result = VisitService::new(api.as_ref()).reschedule(
                &intent.visit_id,
                &intent.staff_id,
                intent.new_start,
                intent.new_end,
            );

            let event = AppEvent::RescheduleResolved {
                visit_id: intent.visit_id,
                result,
            };
            if tx.send(event).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Submit an edit from the visit dialog.
    pub(super) fn spawn_visit_update(
        &mut self,
        ctx: &egui::Context,
        visit_id: String,
        change: VisitChange,
    ) {
        if change.is_empty() {
            return;
        }

        let api: Arc<dyn ScheduleApi> = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let result = VisitService::new(api.as_ref()).update(&visit_id, &change);
            if tx.send(AppEvent::VisitSaved { visit_id, result }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Apply everything the workers delivered since the previous frame.
    pub(super) fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(ctx, event);
        }
    }

    fn apply_event(&mut self, ctx: &egui::Context, event: AppEvent) {
        match event {
            AppEvent::DayLoaded { date, result } => {
                self.loading = false;
                match result {
                    Ok(snapshot) if date == self.target_date => {
                        self.board = DayBoard::from_snapshot(date, snapshot.staff, snapshot.visits);
                        log::debug!(
                            "Loaded {} staff / {} visits for {}",
                            self.board.staff.len(),
                            self.board.assigned.len() + self.board.unassigned.len(),
                            date
                        );
                    }
                    Ok(_) => {
                        log::debug!("Discarding stale load for {}", date);
                    }
                    Err(err) => {
                        log::error!("Failed to load schedule for {}: {}", date, err);
                        self.toasts.error(format!("Failed to load schedule: {}", err));
                    }
                }
            }
            AppEvent::RescheduleResolved { visit_id, result } => {
                self.in_flight.remove(&visit_id);
                match result {
                    Ok(visit) => {
                        self.toasts.info(format!(
                            "Moved {} to {}",
                            visit.client_label(),
                            visit.scheduled_start.format("%H:%M")
                        ));
                        // Server-authoritative truth: refresh everything
                        // rather than patching the moved visit locally.
                        self.spawn_day_load(ctx);
                    }
                    Err(err) => {
                        log::warn!("Reschedule of {} rejected: {}", visit_id, err);
                        self.toasts.error(format!("Could not move visit: {}", err));
                    }
                }
            }
            AppEvent::VisitSaved { visit_id, result } => match result {
                Ok(_) => {
                    self.toasts.info("Visit updated");
                    self.spawn_day_load(ctx);
                }
                Err(err) => {
                    log::warn!("Update of {} rejected: {}", visit_id, err);
                    self.toasts.error(format!("Could not update visit: {}", err));
                }
            },
        }
    }
}
