use chrono::{DateTime, Duration, Local, NaiveTime, Timelike};

pub const SHIFT_1: &str = "Shift 1";
pub const SHIFT_2: &str = "Shift 2";
pub const SHIFT_3: &str = "Shift 3";
pub const UNKNOWN_SHIFT: &str = "Unknown Shift";

#[derive(Debug, Clone)]
pub struct ShiftDefinition {
    pub name: &'static str,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

pub fn shift_definitions() -> Vec<ShiftDefinition> {
    vec![
        ShiftDefinition { name: SHIFT_1, start: hms(7, 30), end: hms(14, 0) },
        ShiftDefinition { name: SHIFT_2, start: hms(14, 0), end: hms(22, 0) },
        ShiftDefinition { name: SHIFT_3, start: hms(22, 0), end: hms(6, 0) },
    ]
}

fn hms(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

/// Live classifier for the clock display. Shift 3 wraps midnight; the
/// 06:00-07:30 gap belongs to no shift.
pub fn current_shift(now: NaiveTime) -> &'static str {
    for shift in shift_definitions() {
        if shift.name == SHIFT_3 {
            if now >= shift.start || now < hms(6, 0) {
                return shift.name;
            }
        } else if shift.start <= now && now < shift.end {
            return shift.name;
        }
    }
    UNKNOWN_SHIFT
}

/// Bucket classifier used when deriving the shift column of a logged crane
/// row. Keyed on the hour only and has no unknown case, so it is NOT
/// interchangeable with `current_shift`.
pub fn shift_for_timestamp(t: DateTime<Local>) -> &'static str {
    match t.hour() {
        7..=13 => SHIFT_1,
        14..=21 => SHIFT_2,
        _ => SHIFT_3,
    }
}

/// "HH:MM:SS", zero padded, for live timer readouts.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// "H:MM:SS" with unpadded hours, for logged duration columns.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub fn format_time(t: DateTime<Local>) -> String {
    t.format("%H:%M:%S").to_string()
}

pub fn format_date(t: DateTime<Local>) -> String {
    t.format("%Y-%m-%d").to_string()
}
