// Test fixtures - reusable staff and visit builders

use care_board::models::staff::{Staff, StaffRole};
use care_board::models::visit::{ServiceKind, Visit, VisitMode, VisitStatus};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

/// The date every fixture lives on.
pub fn board_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

pub fn at(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 3, 10, hour, minute, 0)
        .unwrap()
}

pub fn staff(id: &str, name: &str, max_hours_day: f64) -> Staff {
    Staff {
        id: id.to_string(),
        name: name.to_string(),
        role: StaffRole::Staff,
        skills: vec![ServiceKind::PersonalCare, ServiceKind::Housework],
        max_hours_day,
        hourly_rate: 1200,
        active: true,
    }
}

pub fn visit(
    id: &str,
    staff_id: Option<&str>,
    start_hour: u32,
    start_minute: u32,
    duration_min: i64,
) -> Visit {
    let start = at(start_hour, start_minute);
    Visit {
        id: id.to_string(),
        client_id: format!("client-of-{}", id),
        client_name: Some(format!("Client {}", id)),
        staff_id: staff_id.map(str::to_string),
        companion_staff_id: None,
        scheduled_start: start,
        scheduled_end: start + Duration::minutes(duration_min),
        actual_start: None,
        actual_end: None,
        service: ServiceKind::PersonalCare,
        mode: VisitMode::Normal,
        status: VisitStatus::Scheduled,
        note: String::new(),
        date: board_date(),
    }
}
