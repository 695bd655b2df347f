use serde::{Serialize, Deserialize};

use super::error::OpsError;

pub type OperatorName = String;

/// Crane identifiers form a closed set; anything outside `CRANE_IDS` is
/// rejected by the registry.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CraneId(pub u8);

pub const CRANE_IDS: [CraneId; 2] = [CraneId(1), CraneId(2)];

impl std::fmt::Display for CraneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One completed crane interval. Shift and duration are derived at append
/// time; the date is the calendar date at the moment of logging.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CraneRow {
    pub date: String,
    pub shift: String,
    pub crane_number: u8,
    pub operator: String,
    pub start_time: String,
    pub stop_time: String,
    pub active_duration: String,
    pub idle_reason: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BargeRow {
    pub date: String,
    pub barge: String,
    pub start_time: String,
    pub stop_time: String,
    pub tons_loaded: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratorRow {
    pub date: String,
    pub generator: String,
    pub start_time: String,
    pub stop_time: String,
    pub active_duration: String,
}

/// Ship rows may be logged with any of the non-name fields absent; absent
/// fields are stored as empty strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShipRow {
    pub date: String,
    pub ship: String,
    pub start_time: String,
    pub finished_time: String,
    pub quantity: String,
    pub hatches: String,
}

/// The whole persistent log: one table per equipment category, all held in a
/// single YAML document.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct LogBook {
    pub crane: Vec<CraneRow>,
    pub barge: Vec<BargeRow>,
    pub generator: Vec<GeneratorRow>,
    pub ship: Vec<ShipRow>,
}

/// Parses a user-entered numeric field, mapping any parse failure to a
/// `Validation` error carrying the field name and the offending input.
pub fn parse_numeric<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, OpsError> {
    raw.trim().parse::<T>().map_err(|_| OpsError::Validation {
        field,
        value: raw.trim().to_string(),
    })
}
