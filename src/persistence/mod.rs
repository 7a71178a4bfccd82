use crate::calendar;
use crate::phase::{Phase, PhaseDates};
use crate::schedule::Schedule;
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
    NotFound,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::NotFound => write!(f, "no schedule stored"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub trait ScheduleStore {
    fn save_schedule(&self, schedule: &Schedule) -> PersistenceResult<()>;
    fn load_schedule(&self) -> PersistenceResult<Option<Schedule>>;
}

/// Reject phase lists that could not have come out of the scheduler:
/// negative durations, duplicate names, dated inactive phases, or spans
/// that break the workday invariants.
pub fn validate_phases(phases: &[Phase]) -> PersistenceResult<()> {
    let mut seen_names = HashSet::with_capacity(phases.len());
    for phase in phases {
        if phase.workdays < 0 {
            return Err(PersistenceError::InvalidData(format!(
                "phase '{}' has negative workdays {}",
                phase.name, phase.workdays
            )));
        }
        if !seen_names.insert(phase.name.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate phase name '{}'",
                phase.name
            )));
        }

        match phase.dates {
            PhaseDates::Unscheduled => {}
            PhaseDates::Scheduled(span) => {
                if phase.workdays == 0 {
                    return Err(PersistenceError::InvalidData(format!(
                        "phase '{}' has zero workdays but scheduled dates",
                        phase.name
                    )));
                }
                if span.start > span.end {
                    return Err(PersistenceError::InvalidData(format!(
                        "phase '{}' ends before it starts ({} > {})",
                        phase.name, span.start, span.end
                    )));
                }
                if calendar::is_non_work_day(span.start) {
                    return Err(PersistenceError::InvalidData(format!(
                        "phase '{}' starts on a non-work day {}",
                        phase.name, span.start
                    )));
                }
                if calendar::is_non_work_day(span.end) {
                    return Err(PersistenceError::InvalidData(format!(
                        "phase '{}' ends on a non-work day {}",
                        phase.name, span.end
                    )));
                }
                let counted = calendar::count_work_days(span.start, span.end);
                if counted != phase.workdays {
                    return Err(PersistenceError::InvalidData(format!(
                        "phase '{}' spans {} work days but claims {}",
                        phase.name, counted, phase.workdays
                    )));
                }
            }
        }
    }
    Ok(())
}

pub fn validate_schedule(schedule: &Schedule) -> PersistenceResult<()> {
    validate_phases(schedule.phases())
}

#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod file;

pub use file::{
    load_schedule_from_csv, load_schedule_from_json, save_schedule_to_csv, save_schedule_to_json,
};
