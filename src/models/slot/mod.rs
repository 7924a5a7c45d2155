// Time slot module
// Discretization of the scheduling day into fixed 15-minute slots

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};

/// Width of one slot in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Slots per hour.
pub const SLOTS_PER_HOUR: u32 = 60 / SLOT_MINUTES;

/// Slots across the full daily window (24 hours).
pub const SLOTS_PER_DAY: u32 = 24 * SLOTS_PER_HOUR;

/// Hour at which the daily window opens. Slot 0 starts here; the axis wraps
/// past midnight so the window always covers a full 24-hour cycle.
pub const DAY_START_HOUR: u32 = 5;

/// Map an instant to its slot index within the daily window.
///
/// The hour is taken relative to [`DAY_START_HOUR`] modulo 24, so instants
/// before the window start wrap to the tail of the axis. Minutes are floored
/// to the slot boundary. Always returns a value in `[0, SLOTS_PER_DAY)`;
/// instants from other days wrap silently.
pub fn slot_of_instant(instant: DateTime<Local>) -> u32 {
    let rel_hour = (instant.hour() + 24 - DAY_START_HOUR) % 24;
    rel_hour * SLOTS_PER_HOUR + instant.minute() / SLOT_MINUTES
}

/// Format a slot index as an `HH:MM` axis label.
///
/// Round-trips with [`slot_of_instant`] for every slot boundary.
pub fn slot_label(slot: u32) -> String {
    let total_minutes = slot * SLOT_MINUTES;
    let hour = (DAY_START_HOUR + total_minutes / 60) % 24;
    let minute = total_minutes % 60;
    format!("{:02}:{:02}", hour, minute)
}

/// The instant at which the daily window opens on the given date.
pub fn window_start(date: NaiveDate) -> DateTime<Local> {
    date.and_hms_opt(DAY_START_HOUR, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

/// Reconstruct the instant at which a slot starts on the given date.
///
/// Slots past midnight land on the following calendar day. The index is
/// signed because a drop computation may produce a start before the window
/// opens; such intents are left for the backend to judge.
pub fn slot_instant_on(date: NaiveDate, slot: i64) -> DateTime<Local> {
    window_start(date) + Duration::minutes(slot * SLOT_MINUTES as i64)
}

/// Number of slots a scheduled span occupies, clamped to at least one so a
/// malformed zero or negative span never produces an empty block.
pub fn duration_slots(start: DateTime<Local>, end: DateTime<Local>) -> i64 {
    (slot_of_instant(end) as i64 - slot_of_instant(start) as i64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_slot_of_morning_instant() {
        // 09:00 is four hours past the 05:00 window start
        assert_eq!(slot_of_instant(at(9, 0)), 16);
        assert_eq!(slot_of_instant(at(9, 44)), 18);
    }

    #[test]
    fn test_slot_of_instant_floors_to_boundary() {
        assert_eq!(slot_of_instant(at(9, 14)), 16);
        assert_eq!(slot_of_instant(at(9, 15)), 17);
    }

    #[test]
    fn test_slot_of_instant_wraps_before_window() {
        // 01:00 belongs to the tail of the previous window
        assert_eq!(slot_of_instant(at(1, 0)), 80);
        assert_eq!(slot_of_instant(at(4, 45)), 95);
        assert_eq!(slot_of_instant(at(5, 0)), 0);
    }

    #[test_case(0, "05:00" ; "window start")]
    #[test_case(16, "09:00" ; "mid morning")]
    #[test_case(76, "00:00" ; "midnight wrap")]
    #[test_case(80, "01:00" ; "past midnight")]
    #[test_case(95, "04:45" ; "last slot")]
    fn test_slot_label(slot: u32, expected: &str) {
        assert_eq!(slot_label(slot), expected);
    }

    #[test]
    fn test_label_round_trips_for_all_slots() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        for slot in 0..SLOTS_PER_DAY {
            let instant = slot_instant_on(date, slot as i64);
            assert_eq!(slot_of_instant(instant), slot);
            assert_eq!(slot_label(slot), instant.format("%H:%M").to_string());
        }
    }

    #[test]
    fn test_slot_instant_crosses_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let instant = slot_instant_on(date, 80);
        assert_eq!(
            instant,
            Local.with_ymd_and_hms(2026, 3, 11, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_slot_instant_accepts_negative_index() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let instant = slot_instant_on(date, -2);
        assert_eq!(
            instant,
            Local.with_ymd_and_hms(2026, 3, 10, 4, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_duration_slots() {
        assert_eq!(duration_slots(at(9, 0), at(9, 45)), 3);
        assert_eq!(duration_slots(at(9, 0), at(10, 0)), 4);
    }

    #[test]
    fn test_duration_slots_clamps_malformed_span() {
        assert_eq!(duration_slots(at(9, 0), at(9, 0)), 1);
        assert_eq!(duration_slots(at(10, 0), at(9, 0)), 1);
    }
}
