use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculations::forward_pass::ForwardPass;
use crate::metadata::ScheduleMetadata;
use crate::phase::{Phase, date_to_i32};

/// A project schedule: an ordered phase list plus metadata. Ordering is the
/// execution order. The struct is a plain value; scheduling math lives in
/// `calculations` and returns new values rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    metadata: ScheduleMetadata,
    phases: Vec<Phase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub scheduled_phases: usize,
    pub total_duration_days: Option<i64>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Schedule {
    pub fn new() -> Self {
        Self::new_with_metadata(ScheduleMetadata::default())
    }

    pub fn new_with_metadata(metadata: ScheduleMetadata) -> Self {
        Self {
            metadata,
            phases: Vec::new(),
        }
    }

    /// Build a schedule from a phase template and compute its dates.
    pub fn from_template(metadata: ScheduleMetadata, phases: Vec<Phase>) -> Self {
        Self { metadata, phases }.compute()
    }

    /// Reassemble a schedule from stored parts without recomputing dates.
    pub(crate) fn from_parts(metadata: ScheduleMetadata, phases: Vec<Phase>) -> Self {
        Self { metadata, phases }
    }

    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: ScheduleMetadata) {
        self.metadata = metadata;
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Look a phase up by its name. Names are unique within a schedule.
    pub fn find_phase(&self, name: &str) -> Option<(usize, &Phase)> {
        self.phases
            .iter()
            .enumerate()
            .find(|(_, phase)| phase.name == name)
    }

    /// Same metadata, different phase list.
    pub(crate) fn with_phases(&self, phases: Vec<Phase>) -> Schedule {
        Schedule {
            metadata: self.metadata.clone(),
            phases,
        }
    }

    /// Insert the phase, or replace the phase with the same name. Duration
    /// or template changes ripple through the layout, so dates are
    /// recomputed immediately.
    pub fn upsert_phase(&mut self, phase: Phase) {
        match self.phases.iter_mut().find(|p| p.name == phase.name) {
            Some(existing) => *existing = phase,
            None => self.phases.push(phase),
        }
        self.refresh();
    }

    pub fn remove_phase(&mut self, name: &str) -> bool {
        let before = self.phases.len();
        self.phases.retain(|phase| phase.name != name);
        let removed = self.phases.len() != before;
        if removed {
            self.refresh();
        }
        removed
    }

    /// Pure forward pass over the current phase order and start date.
    pub fn compute(&self) -> Schedule {
        let phases = ForwardPass::new(&self.phases).execute(self.metadata.project_start_date);
        self.with_phases(phases)
    }

    /// Recompute dates in place.
    pub fn refresh(&mut self) -> RefreshSummary {
        *self = self.compute();
        RefreshSummary {
            scheduled_phases: self.phases.iter().filter(|p| p.span().is_some()).count(),
            total_duration_days: self.total_duration_days(),
        }
    }

    /// Calendar days from the project start date through the last scheduled
    /// end date, inclusive. `None` while nothing is scheduled.
    pub fn total_duration_days(&self) -> Option<i64> {
        let last_end = self.phases.iter().filter_map(|p| p.end_date()).max()?;
        Some((last_end - self.metadata.project_start_date).num_days() + 1)
    }

    /// Tabular view of the phase list for reports and the CLI. Dates are
    /// nullable; unscheduled phases keep their rows with null dates.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = self.phases.iter().map(|p| p.name.as_str()).collect();
        let workdays: Vec<i64> = self.phases.iter().map(|p| p.workdays).collect();
        let colors: Vec<&str> = self.phases.iter().map(|p| p.color.as_str()).collect();
        let starts: Vec<Option<i32>> = self
            .phases
            .iter()
            .map(|p| p.start_date().map(date_to_i32))
            .collect();
        let ends: Vec<Option<i32>> = self
            .phases
            .iter()
            .map(|p| p.end_date().map(date_to_i32))
            .collect();

        let columns: Vec<Column> = vec![
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("workdays"), workdays).into_column(),
            Series::new(PlSmallStr::from_static("color"), colors).into_column(),
            Series::new(PlSmallStr::from_static("start_date"), starts)
                .cast(&DataType::Date)?
                .into_column(),
            Series::new(PlSmallStr::from_static("end_date"), ends)
                .cast(&DataType::Date)?
                .into_column(),
        ];

        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn upsert_phase_inserts_and_updates() {
        let mut schedule = Schedule::new();
        schedule.upsert_phase(Phase::new("Framing Crew", 5, "#b45309"));
        assert_eq!(schedule.phases().len(), 1);

        schedule.upsert_phase(Phase::new("Framing Crew", 7, "#b45309"));
        assert_eq!(schedule.phases().len(), 1);
        assert_eq!(schedule.phases()[0].workdays, 7);
    }

    #[test]
    fn upsert_phase_recomputes_dates() {
        let mut metadata = ScheduleMetadata::default();
        metadata.project_start_date = d(2025, 1, 6); // Monday
        let mut schedule = Schedule::new_with_metadata(metadata);

        schedule.upsert_phase(Phase::new("Excavation", 3, "#78716c"));
        assert_eq!(schedule.phases()[0].start_date(), Some(d(2025, 1, 6)));
        assert_eq!(schedule.phases()[0].end_date(), Some(d(2025, 1, 8)));
    }

    #[test]
    fn remove_phase_reports_membership() {
        let mut schedule = Schedule::new();
        schedule.upsert_phase(Phase::new("Roofing", 4, "#475569"));
        assert!(schedule.remove_phase("Roofing"));
        assert!(!schedule.remove_phase("Roofing"));
    }

    #[test]
    fn to_dataframe_keeps_null_dates_for_inactive_phases() {
        let mut schedule = Schedule::new();
        schedule.upsert_phase(Phase::new("Optional Deck", 0, "#16a34a"));

        let df = schedule.to_dataframe().unwrap();
        assert_eq!(df.height(), 1);
        assert!(df.column("start_date").unwrap().date().unwrap().get(0).is_none());
        assert!(df.column("end_date").unwrap().date().unwrap().get(0).is_none());
    }
}
