//! Drag-and-drop state machine for the scheduling board.
//!
//! The gesture is an explicit tagged state rather than a pair of nullable
//! fields, so a drop target cannot exist without a live session. The math
//! here is pure; the board view feeds it pointer slots and reads the intent
//! back out on release.

use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::models::slot::{duration_slots, slot_instant_on, slot_of_instant, SLOT_MINUTES};
use crate::models::visit::Visit;

/// An in-progress drag of one visit block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub visit_id: String,
    /// Slots between the pointer's grab position and the visit's start slot,
    /// so the drop lands relative to where the block was grabbed rather than
    /// its left edge. May be negative when grabbed left of the start slot.
    pub grab_offset: i64,
    /// Captured at grab time; at least one slot.
    pub duration_slots: i64,
}

/// Candidate cell under the pointer, used only for highlight feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub staff_id: String,
    pub slot: i64,
}

/// The reassignment computed from a completed drop, handed to the
/// rescheduling protocol. Duration is preserved from the dragged visit.
#[derive(Debug, Clone, PartialEq)]
pub struct RescheduleIntent {
    pub visit_id: String,
    pub staff_id: String,
    pub new_start: DateTime<Local>,
    pub new_end: DateTime<Local>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        session: DragSession,
        target: Option<DropTarget>,
    },
}

impl DragState {
    /// Start a drag. A grab while another session is live is discarded; the
    /// board only ever tracks one session.
    pub fn begin(&mut self, visit: &Visit, pointer_slot: i64) {
        if matches!(self, DragState::Dragging { .. }) {
            log::debug!("Ignoring grab of {} during an active drag", visit.id);
            return;
        }

        let start_slot = slot_of_instant(visit.scheduled_start) as i64;
        *self = DragState::Dragging {
            session: DragSession {
                visit_id: visit.id.clone(),
                grab_offset: pointer_slot - start_slot,
                duration_slots: duration_slots(visit.scheduled_start, visit.scheduled_end),
            },
            target: None,
        };
    }

    /// Track the cell under the pointer. Idempotent; ignored while idle.
    pub fn hover(&mut self, staff_id: &str, slot: i64) {
        if let DragState::Dragging { target, .. } = self {
            *target = Some(DropTarget {
                staff_id: staff_id.to_string(),
                slot,
            });
        }
    }

    /// Forget the candidate cell while the pointer is off the grid.
    pub fn clear_target(&mut self) {
        if let DragState::Dragging { target, .. } = self {
            *target = None;
        }
    }

    /// Complete the drag over the current target, returning the implied
    /// reassignment. Returns `None` (and goes idle) when no cell is under
    /// the pointer; that is the silent-discard path for malformed drops.
    pub fn drop_on(&mut self, date: NaiveDate) -> Option<RescheduleIntent> {
        let state = std::mem::take(self);
        let DragState::Dragging {
            session,
            target: Some(target),
        } = state
        else {
            return None;
        };

        let new_start_slot = target.slot - session.grab_offset;
        let new_start = slot_instant_on(date, new_start_slot);
        let new_end = new_start + Duration::minutes(session.duration_slots * SLOT_MINUTES as i64);

        Some(RescheduleIntent {
            visit_id: session.visit_id,
            staff_id: target.staff_id,
            new_start,
            new_end,
        })
    }

    /// Abort the gesture with no intent and no residual target.
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Id of the visit being dragged, if any.
    pub fn dragging_visit(&self) -> Option<&str> {
        match self {
            DragState::Dragging { session, .. } => Some(&session.visit_id),
            DragState::Idle => None,
        }
    }

    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            DragState::Dragging { target, .. } => target.as_ref(),
            DragState::Idle => None,
        }
    }
}
