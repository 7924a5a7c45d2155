// Roster module
// Derived, render-local views over the day's staff and visit collections.
// Everything here is recomputed wholesale from the source collections; the
// structures are never patched in place after an external update.

use std::collections::HashMap;

use crate::models::staff::Staff;
use crate::models::visit::{Visit, VisitStatus};

/// Per-staff assignment index for one day.
///
/// Maps every listed staff member, including those with no visits, to their
/// visits (insertion order) and total assigned minutes. Visits referencing a
/// staff id that is not in the list are skipped; the caller keeps those in
/// the unassigned tray.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterIndex {
    visits_by_staff: HashMap<String, Vec<Visit>>,
    minutes_by_staff: HashMap<String, i64>,
}

impl RosterIndex {
    pub fn build(staff: &[Staff], visits: &[Visit]) -> Self {
        let mut visits_by_staff: HashMap<String, Vec<Visit>> = staff
            .iter()
            .map(|member| (member.id.clone(), Vec::new()))
            .collect();

        for visit in visits {
            let Some(staff_id) = visit.staff_id.as_deref() else {
                continue;
            };
            if let Some(list) = visits_by_staff.get_mut(staff_id) {
                list.push(visit.clone());
            }
        }

        let minutes_by_staff = visits_by_staff
            .iter()
            .map(|(id, list)| {
                let minutes = list.iter().map(Visit::duration_minutes).sum();
                (id.clone(), minutes)
            })
            .collect();

        Self {
            visits_by_staff,
            minutes_by_staff,
        }
    }

    pub fn visits_for(&self, staff_id: &str) -> &[Visit] {
        self.visits_by_staff
            .get(staff_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn assigned_minutes(&self, staff_id: &str) -> i64 {
        self.minutes_by_staff.get(staff_id).copied().unwrap_or(0)
    }

    pub fn assigned_hours(&self, staff_id: &str) -> f64 {
        self.assigned_minutes(staff_id) as f64 / 60.0
    }

    pub fn contains(&self, staff_id: &str) -> bool {
        self.visits_by_staff.contains_key(staff_id)
    }
}

/// Utilization ratio clamped to `1.0`. A non-positive capacity counts as
/// fully utilized rather than dividing by zero.
pub fn utilization(assigned_hours: f64, max_hours_day: f64) -> f32 {
    if max_hours_day <= 0.0 {
        return 1.0;
    }
    ((assigned_hours / max_hours_day) as f32).min(1.0)
}

/// Advisory capacity classification driving the indicator color only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityBand {
    Normal,
    NearLimit,
    Over,
}

impl CapacityBand {
    pub fn of(ratio: f32) -> Self {
        if ratio >= 1.0 {
            CapacityBand::Over
        } else if ratio >= 0.9 {
            CapacityBand::NearLimit
        } else {
            CapacityBand::Normal
        }
    }
}

/// Completed-versus-total summary for the toolbar progress bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayProgress {
    pub total: usize,
    pub completed: usize,
}

impl DayProgress {
    pub fn of(visits: &[Visit]) -> Self {
        Self {
            total: visits.len(),
            completed: visits
                .iter()
                .filter(|v| v.status == VisitStatus::Completed)
                .count(),
        }
    }

    /// Completion rate in percent, 0 for an empty day.
    pub fn rate(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f32 / self.total as f32 * 100.0
    }
}
