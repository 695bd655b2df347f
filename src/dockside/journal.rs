use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use super::clock::{format_date, format_duration, format_time, shift_for_timestamp};
use super::error::OpsError;
use super::types::{BargeRow, CraneId, CraneRow, GeneratorRow, LogBook, ShipRow};

/// Append-only store of completed operation intervals: a single YAML
/// document holding one table per equipment category.
///
/// Every append loads the document, pushes exactly one row and rewrites the
/// file through a temp-file rename, so a failed write leaves the previous
/// contents on disk untouched.
#[derive(Debug, Clone)]
pub struct OperationLog {
    path: PathBuf,
}

impl OperationLog {
    /// Opens the log at `path`, materializing an empty document with all four
    /// tables if the file does not exist yet.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, OpsError> {
        let log = OperationLog { path: path.into() };
        if !log.path.exists() {
            log.write(&LogBook::default())?;
        }
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<LogBook, OpsError> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn write(&self, book: &LogBook) -> Result<(), OpsError> {
        let rendered = serde_yaml::to_string(book)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, rendered)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn append(&self, push: impl FnOnce(&mut LogBook)) -> Result<(), OpsError> {
        let mut book = self.load()?;
        push(&mut book);
        self.write(&book)
    }

    pub fn append_crane(
        &self,
        number: CraneId,
        operator: &str,
        start: DateTime<Local>,
        stop: DateTime<Local>,
        idle_reason: &str,
    ) -> Result<(), OpsError> {
        debug!(crane = number.0, operator, "appending crane row");
        self.append(|book| {
            book.crane.push(CraneRow {
                date: format_date(Local::now()),
                shift: shift_for_timestamp(start).to_string(),
                crane_number: number.0,
                operator: operator.to_string(),
                start_time: format_time(start),
                stop_time: format_time(stop),
                active_duration: format_duration(stop - start),
                idle_reason: idle_reason.to_string(),
            });
        })
    }

    pub fn append_barge(
        &self,
        name: &str,
        start: DateTime<Local>,
        stop: DateTime<Local>,
        tons_loaded: f64,
    ) -> Result<(), OpsError> {
        debug!(barge = name, tons_loaded, "appending barge row");
        self.append(|book| {
            book.barge.push(BargeRow {
                date: format_date(Local::now()),
                barge: name.to_string(),
                start_time: format_time(start),
                stop_time: format_time(stop),
                tons_loaded,
            });
        })
    }

    pub fn append_generator(
        &self,
        id: &str,
        start: DateTime<Local>,
        stop: DateTime<Local>,
    ) -> Result<(), OpsError> {
        debug!(generator = id, "appending generator row");
        self.append(|book| {
            book.generator.push(GeneratorRow {
                date: format_date(Local::now()),
                generator: id.to_string(),
                start_time: format_time(start),
                stop_time: format_time(stop),
                active_duration: format_duration(stop - start),
            });
        })
    }

    /// Absent fields are logged as empty strings.
    pub fn append_ship(
        &self,
        name: &str,
        start: Option<DateTime<Local>>,
        finish: Option<DateTime<Local>>,
        quantity: Option<f64>,
        hatches: Option<u32>,
    ) -> Result<(), OpsError> {
        debug!(ship = name, "appending ship row");
        self.append(|book| {
            book.ship.push(ShipRow {
                date: format_date(Local::now()),
                ship: name.to_string(),
                start_time: start.map(format_time).unwrap_or_default(),
                finished_time: finish.map(format_time).unwrap_or_default(),
                quantity: quantity.map(|q| q.to_string()).unwrap_or_default(),
                hatches: hatches.map(|h| h.to_string()).unwrap_or_default(),
            });
        })
    }
}
