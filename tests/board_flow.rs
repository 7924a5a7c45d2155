// Integration tests for the load -> drag -> reschedule -> reload cycle,
// driven against an in-memory backend standing in for the visit service.

mod fixtures;

use std::sync::Mutex;

use care_board::models::slot::{slot_instant_on, slot_of_instant};
use care_board::models::staff::Staff;
use care_board::models::visit::{Visit, VisitStatus};
use care_board::services::api::{ApiError, ScheduleApi};
use care_board::services::staff::StaffService;
use care_board::services::visit::{VisitChange, VisitService};
use care_board::ui::app::data::DayBoard;
use care_board::ui::drag::DragState;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use fixtures::{at, board_date, staff, visit};

/// In-memory scheduling backend with the same double-booking rule the real
/// service applies.
struct FakeBackend {
    staff: Mutex<Vec<Staff>>,
    visits: Mutex<Vec<Visit>>,
}

impl FakeBackend {
    fn new(staff: Vec<Staff>, visits: Vec<Visit>) -> Self {
        Self {
            staff: Mutex::new(staff),
            visits: Mutex::new(visits),
        }
    }
}

impl ScheduleApi for FakeBackend {
    fn visits_for(&self, date: NaiveDate) -> Result<Vec<Visit>, ApiError> {
        Ok(self
            .visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.date == date)
            .cloned()
            .collect())
    }

    fn staff(&self) -> Result<Vec<Staff>, ApiError> {
        Ok(self.staff.lock().unwrap().clone())
    }

    fn update_visit(&self, visit_id: &str, change: &VisitChange) -> Result<Visit, ApiError> {
        let mut visits = self.visits.lock().unwrap();
        let Some(pos) = visits.iter().position(|v| v.id == visit_id) else {
            return Err(ApiError::NotFound);
        };

        let mut candidate = visits[pos].clone();
        if let Some(staff_id) = &change.staff_id {
            candidate.staff_id = Some(staff_id.clone());
        }
        if let Some(start) = change.scheduled_start {
            candidate.scheduled_start = start;
        }
        if let Some(end) = change.scheduled_end {
            candidate.scheduled_end = end;
        }
        if let Some(status) = change.status {
            candidate.status = status;
        }
        if let Some(note) = &change.note {
            candidate.note = note.clone();
        }
        if let Some(mode) = change.mode {
            candidate.mode = mode;
        }
        if let Some(companion) = &change.companion_staff_id {
            candidate.companion_staff_id = companion.clone();
        }

        if candidate.scheduled_end <= candidate.scheduled_start {
            return Err(ApiError::Validation("end before start".to_string()));
        }

        if let Some(staff_id) = candidate.staff_id.as_deref() {
            let overlap = visits.iter().any(|other| {
                other.id != candidate.id
                    && other.staff_id.as_deref() == Some(staff_id)
                    && other.status != VisitStatus::Cancelled
                    && other.scheduled_start < candidate.scheduled_end
                    && other.scheduled_end > candidate.scheduled_start
            });
            if overlap {
                return Err(ApiError::Conflict(
                    "double booking with an existing visit".to_string(),
                ));
            }
        }

        visits[pos] = candidate.clone();
        Ok(candidate)
    }
}

fn load_board(backend: &FakeBackend) -> DayBoard {
    let staff = StaffService::new(backend).list().unwrap();
    let visits = VisitService::new(backend).list(board_date()).unwrap();
    DayBoard::from_snapshot(board_date(), staff, visits)
}

#[test]
fn test_day_board_splits_assigned_and_unassigned() {
    let backend = FakeBackend::new(
        vec![staff("a", "Tanaka", 8.0), staff("b", "Suzuki", 8.0)],
        vec![
            visit("v1", Some("a"), 9, 0, 60),
            visit("v2", None, 10, 0, 30),
            visit("v3", Some("ghost"), 11, 0, 30),
        ],
    );

    let board = load_board(&backend);

    assert_eq!(board.assigned.len(), 1);
    assert_eq!(board.roster.visits_for("a").len(), 1);
    // Zero-visit staff keep their row and an empty index entry
    assert!(board.roster.contains("b"));
    assert_eq!(board.roster.assigned_minutes("b"), 0);
    // Unassigned and dangling staff references both land in the tray
    let tray_ids: Vec<&str> = board.unassigned.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(tray_ids, vec!["v2", "v3"]);
}

#[test]
fn test_drag_drop_reschedule_and_reload() {
    let backend = FakeBackend::new(
        vec![staff("a", "Tanaka", 8.0), staff("b", "Suzuki", 8.0)],
        vec![visit("v1", Some("a"), 9, 0, 45)],
    );
    let board = load_board(&backend);
    let dragged = board.visit("v1").unwrap().clone();

    // Grab the block two slots right of its start, drop it on staff b at
    // slot 40: the new start compensates for the grab offset.
    let mut drag = DragState::default();
    let grab_slot = slot_of_instant(dragged.scheduled_start) as i64 + 2;
    drag.begin(&dragged, grab_slot);
    drag.hover("b", 42);
    let intent = drag.drop_on(board.date).expect("intent");
    assert_eq!(intent.new_start, slot_instant_on(board.date, 40));

    let moved = VisitService::new(&backend)
        .reschedule(&intent.visit_id, &intent.staff_id, intent.new_start, intent.new_end)
        .expect("reschedule succeeds");
    assert_eq!(moved.staff_id.as_deref(), Some("b"));

    // Full reload reflects server truth: the visit sits on b's row at the
    // new span and a's row no longer holds it.
    let reloaded = load_board(&backend);
    assert!(reloaded.roster.visits_for("a").is_empty());
    let on_b = reloaded.roster.visits_for("b");
    assert_eq!(on_b.len(), 1);
    assert_eq!(on_b[0].scheduled_start, slot_instant_on(board.date, 40));
    assert_eq!(on_b[0].duration_minutes(), 45, "duration is preserved");
}

#[test]
fn test_failed_reschedule_leaves_board_identical() {
    let backend = FakeBackend::new(
        vec![staff("a", "Tanaka", 8.0), staff("b", "Suzuki", 8.0)],
        vec![
            visit("v1", Some("a"), 9, 0, 60),
            visit("v2", Some("b"), 9, 30, 60),
        ],
    );
    let before = load_board(&backend);

    // Moving v1 onto b at its current time overlaps v2
    let target = before.visit("v1").unwrap();
    let err = VisitService::new(&backend)
        .reschedule("v1", "b", target.scheduled_start, target.scheduled_end)
        .expect_err("double booking must be rejected");
    assert!(matches!(err, ApiError::Conflict(_)));

    // No local mutation happened ahead of confirmation, so a reload yields
    // an assignment index identical to the pre-drag one.
    let after = load_board(&backend);
    assert_eq!(after.roster, before.roster);
    assert_eq!(after.assigned, before.assigned);
}

#[test]
fn test_unknown_visit_is_not_found() {
    let backend = FakeBackend::new(vec![staff("a", "Tanaka", 8.0)], vec![]);
    let err = VisitService::new(&backend)
        .reschedule("missing", "a", at(9, 0), at(10, 0))
        .expect_err("unknown id");
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn test_reversed_span_is_rejected_locally() {
    let backend = FakeBackend::new(
        vec![staff("a", "Tanaka", 8.0)],
        vec![visit("v1", Some("a"), 9, 0, 60)],
    );
    let err = VisitService::new(&backend)
        .reschedule("v1", "a", at(10, 0), at(9, 0))
        .expect_err("reversed span");
    assert!(matches!(err, ApiError::Validation(_)));

    // The backend was never touched
    let board = load_board(&backend);
    assert_eq!(board.roster.visits_for("a")[0].scheduled_start, at(9, 0));
}

#[test]
fn test_oversized_note_is_rejected_locally() {
    let backend = FakeBackend::new(
        vec![staff("a", "Tanaka", 8.0)],
        vec![visit("v1", Some("a"), 9, 0, 60)],
    );

    let change = VisitChange {
        note: Some("x".repeat(501)),
        ..VisitChange::default()
    };
    let err = VisitService::new(&backend)
        .update("v1", &change)
        .expect_err("oversized note");
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn test_sequential_drags_succeed_independently() {
    let backend = FakeBackend::new(
        vec![
            staff("a", "Tanaka", 8.0),
            staff("b", "Suzuki", 8.0),
            staff("c", "Mori", 8.0),
        ],
        vec![
            visit("v1", Some("a"), 9, 0, 60),
            visit("v2", Some("a"), 12, 0, 30),
        ],
    );
    let service = VisitService::new(&backend);
    let mut drag = DragState::default();

    // First gesture: v1 to staff b
    let board = load_board(&backend);
    let v1 = board.visit("v1").unwrap().clone();
    drag.begin(&v1, slot_of_instant(v1.scheduled_start) as i64);
    drag.hover("b", 24);
    let first = drag.drop_on(board.date).expect("first intent");
    service
        .reschedule(&first.visit_id, &first.staff_id, first.new_start, first.new_end)
        .expect("first move");

    // Second gesture on refreshed data: v2 to staff c, unaffected by the
    // previous drop target
    let board = load_board(&backend);
    let v2 = board.visit("v2").unwrap().clone();
    drag.begin(&v2, slot_of_instant(v2.scheduled_start) as i64);
    assert!(drag.target().is_none(), "no drop target leaks between drags");
    drag.hover("c", 60);
    let second = drag.drop_on(board.date).expect("second intent");
    service
        .reschedule(&second.visit_id, &second.staff_id, second.new_start, second.new_end)
        .expect("second move");

    let final_board = load_board(&backend);
    assert_eq!(final_board.roster.visits_for("a").len(), 0);
    assert_eq!(final_board.roster.visits_for("b").len(), 1);
    assert_eq!(final_board.roster.visits_for("c").len(), 1);
    assert_eq!(final_board.roster.visits_for("b")[0].id, "v1");
    assert_eq!(final_board.roster.visits_for("c")[0].id, "v2");
}

#[test]
fn test_utilization_reflects_reassignment() {
    let backend = FakeBackend::new(
        vec![staff("a", "Tanaka", 2.0), staff("b", "Suzuki", 8.0)],
        vec![
            visit("v1", Some("a"), 9, 0, 60),
            visit("v2", Some("a"), 10, 30, 90),
        ],
    );

    let board = load_board(&backend);
    assert_eq!(board.roster.assigned_minutes("a"), 150);

    // 2.5h against a two-hour day clamps to full utilization
    let ratio = care_board::models::roster::utilization(
        board.roster.assigned_hours("a"),
        2.0,
    );
    assert_eq!(ratio, 1.0);
}
