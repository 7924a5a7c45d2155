//! Visit service.
//! Thin operations over the backend visit collection: listing a day and
//! submitting sparse updates, including the reschedule path the drag board
//! emits into.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::models::visit::{Visit, VisitMode, VisitStatus, NOTE_MAX_CHARS};
use crate::services::api::{ApiError, ScheduleApi};

/// Sparse update payload for `PUT /visits/{id}`. Only fields that are set
/// are serialized; `companion_staff_id` is doubly optional so the companion
/// can be cleared (`Some(None)` serializes as an explicit null).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisitChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VisitStatus>,
    #[serde(rename = "visit_note", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "visit_type", skip_serializing_if = "Option::is_none")]
    pub mode: Option<VisitMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion_staff_id: Option<Option<String>>,
}

impl VisitChange {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Service for visit operations against the backend.
pub struct VisitService<'a> {
    api: &'a dyn ScheduleApi,
}

impl<'a> VisitService<'a> {
    pub fn new(api: &'a dyn ScheduleApi) -> Self {
        Self { api }
    }

    /// Every visit of the date, assigned and unassigned.
    pub fn list(&self, date: NaiveDate) -> Result<Vec<Visit>, ApiError> {
        self.api.visits_for(date)
    }

    /// Move a visit to a new staff row and time span, keeping everything
    /// else untouched. The span is sanity-checked locally; qualification and
    /// overlap checks stay with the backend.
    pub fn reschedule(
        &self,
        visit_id: &str,
        staff_id: &str,
        new_start: DateTime<Local>,
        new_end: DateTime<Local>,
    ) -> Result<Visit, ApiError> {
        if new_end <= new_start {
            return Err(ApiError::Validation(
                "the moved visit would end before it starts".to_string(),
            ));
        }

        let change = VisitChange {
            staff_id: Some(staff_id.to_string()),
            scheduled_start: Some(new_start),
            scheduled_end: Some(new_end),
            ..VisitChange::default()
        };

        log::info!(
            "Rescheduling visit {} to staff {} at {}",
            visit_id,
            staff_id,
            new_start.format("%H:%M")
        );
        self.api.update_visit(visit_id, &change)
    }

    /// Submit an edit from the visit dialog.
    pub fn update(&self, visit_id: &str, change: &VisitChange) -> Result<Visit, ApiError> {
        if let Some(note) = &change.note {
            if note.chars().count() > NOTE_MAX_CHARS {
                return Err(ApiError::Validation(format!(
                    "note exceeds {} characters",
                    NOTE_MAX_CHARS
                )));
            }
        }

        self.api.update_visit(visit_id, change)
    }
}
