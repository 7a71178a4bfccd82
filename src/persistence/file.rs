use super::{PersistenceError, PersistenceResult};
use crate::metadata::ScheduleMetadata;
use crate::phase::{DateSpan, Phase, PhaseDates};
use crate::schedule::Schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// On-disk phase shape: dates are `YYYY-MM-DD` strings or null. Inactive
/// phases keep their rows with null dates so the template structure
/// survives a save/reload cycle.
#[derive(Serialize, Deserialize)]
struct PhaseRecord {
    name: String,
    workdays: i64,
    color: String,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl From<&Phase> for PhaseRecord {
    fn from(phase: &Phase) -> Self {
        Self {
            name: phase.name.clone(),
            workdays: phase.workdays,
            color: phase.color.clone(),
            start_date: phase.start_date().map(|d| d.format("%Y-%m-%d").to_string()),
            end_date: phase.end_date().map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl PhaseRecord {
    fn into_phase(self) -> PersistenceResult<Phase> {
        let start = self.start_date.as_deref().map(parse_date).transpose()?;
        let end = self.end_date.as_deref().map(parse_date).transpose()?;
        let dates = match (start, end) {
            (Some(start), Some(end)) => PhaseDates::Scheduled(DateSpan::new(start, end)),
            (None, None) => PhaseDates::Unscheduled,
            _ => {
                return Err(PersistenceError::InvalidData(format!(
                    "phase '{}' has only one of start_date/end_date",
                    self.name
                )));
            }
        };
        Ok(Phase {
            name: self.name,
            workdays: self.workdays,
            color: self.color,
            dates,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct ScheduleSnapshot {
    metadata: ScheduleMetadata,
    phases: Vec<PhaseRecord>,
    total_duration_days: Option<i64>,
}

impl ScheduleSnapshot {
    fn from_schedule(schedule: &Schedule) -> PersistenceResult<Self> {
        super::validate_schedule(schedule)?;
        Ok(Self {
            metadata: schedule.metadata().clone(),
            phases: schedule.phases().iter().map(PhaseRecord::from).collect(),
            total_duration_days: schedule.total_duration_days(),
        })
    }

    fn into_schedule(self) -> PersistenceResult<Schedule> {
        let phases = self
            .phases
            .into_iter()
            .map(PhaseRecord::into_phase)
            .collect::<PersistenceResult<Vec<_>>>()?;
        super::validate_phases(&phases)?;
        Ok(Schedule::from_parts(self.metadata, phases))
    }
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ScheduleSnapshot::from_schedule(schedule)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let snapshot: ScheduleSnapshot = serde_json::from_reader(file)?;
    snapshot.into_schedule()
}

#[derive(Serialize, Deserialize)]
struct PhaseCsvRecord {
    name: String,
    workdays: i64,
    color: String,
    start_date: String,
    end_date: String,
}

impl From<&Phase> for PhaseCsvRecord {
    fn from(phase: &Phase) -> Self {
        Self {
            name: phase.name.clone(),
            workdays: phase.workdays,
            color: phase.color.clone(),
            start_date: format_date(phase.start_date()),
            end_date: format_date(phase.end_date()),
        }
    }
}

impl PhaseCsvRecord {
    fn into_phase(self) -> PersistenceResult<Phase> {
        let record = PhaseRecord {
            name: self.name,
            workdays: self.workdays,
            color: self.color,
            start_date: non_empty(self.start_date),
            end_date: non_empty(self.end_date),
        };
        record.into_phase()
    }
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    super::validate_schedule(schedule)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for phase in schedule.phases() {
        writer.serialize(PhaseCsvRecord::from(phase))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_schedule_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut phases = Vec::new();
    for record in reader.deserialize::<PhaseCsvRecord>() {
        let record = record?;
        phases.push(record.into_phase()?);
    }

    if phases.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no phases".into(),
        ));
    }

    super::validate_phases(&phases)?;

    // CSV carries no metadata, so defaults are used. Callers can adjust
    // metadata after load if needed.
    Ok(Schedule::from_parts(ScheduleMetadata::default(), phases))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
