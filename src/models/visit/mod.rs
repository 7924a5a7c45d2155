// Visit module
// A scheduled service occurrence owned by the backend; the app never
// constructs visits from parts, it only reads, displays and patches them.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Upper bound for the free-text visit note.
pub const NOTE_MAX_CHARS: usize = 500;

/// Fixed set of service categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    PersonalCare,
    Housework,
    LifeSupport,
    IntensiveCare,
    DisabilitySupport,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::PersonalCare,
        ServiceKind::Housework,
        ServiceKind::LifeSupport,
        ServiceKind::IntensiveCare,
        ServiceKind::DisabilitySupport,
    ];

    /// Short display label for blocks, tray entries and the legend.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::PersonalCare => "Personal care",
            ServiceKind::Housework => "Housework",
            ServiceKind::LifeSupport => "Life support",
            ServiceKind::IntensiveCare => "Intensive care",
            ServiceKind::DisabilitySupport => "Disability support",
        }
    }
}

/// Staffing arrangement for a visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitMode {
    #[default]
    Normal,
    /// Joint attendance; requires a companion staff member.
    TwoStaff,
    /// A second staff member shadows the visit.
    Accompany,
}

impl VisitMode {
    pub fn label(&self) -> &'static str {
        match self {
            VisitMode::Normal => "Normal",
            VisitMode::TwoStaff => "Two staff",
            VisitMode::Accompany => "Accompany",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NotPerformed,
}

impl VisitStatus {
    pub const ALL: [VisitStatus; 4] = [
        VisitStatus::Scheduled,
        VisitStatus::Completed,
        VisitStatus::Cancelled,
        VisitStatus::NotPerformed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VisitStatus::Scheduled => "Scheduled",
            VisitStatus::Completed => "Completed",
            VisitStatus::Cancelled => "Cancelled",
            VisitStatus::NotPerformed => "Not performed",
        }
    }
}

/// A scheduled care visit as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    #[serde(rename = "visit_id")]
    pub id: String,
    pub client_id: String,
    /// Denormalized by the backend for display; absent for deleted clients.
    #[serde(default)]
    pub client_name: Option<String>,
    /// None means unassigned; such visits live in the tray, never on the grid.
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub companion_staff_id: Option<String>,
    pub scheduled_start: DateTime<Local>,
    pub scheduled_end: DateTime<Local>,
    #[serde(default)]
    pub actual_start: Option<DateTime<Local>>,
    #[serde(default)]
    pub actual_end: Option<DateTime<Local>>,
    #[serde(rename = "service_type")]
    pub service: ServiceKind,
    #[serde(rename = "visit_type", default)]
    pub mode: VisitMode,
    #[serde(default)]
    pub status: VisitStatus,
    #[serde(rename = "visit_note", default)]
    pub note: String,
    pub date: NaiveDate,
}

impl Visit {
    /// Validate the invariants the grid relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.scheduled_end <= self.scheduled_start {
            return Err("Visit must end after it starts".to_string());
        }

        if self.note.chars().count() > NOTE_MAX_CHARS {
            return Err(format!("Visit note exceeds {} characters", NOTE_MAX_CHARS));
        }

        Ok(())
    }

    pub fn is_assigned(&self) -> bool {
        self.staff_id.is_some()
    }

    /// Scheduled span in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.scheduled_end - self.scheduled_start).num_minutes()
    }

    /// Client name with a fallback for visits whose client was removed.
    pub fn client_label(&self) -> &str {
        self.client_name.as_deref().unwrap_or("(unknown client)")
    }
}
