use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar span of a scheduled phase. Both endpoints are work
/// days; the work days inside the span account for the phase's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Scheduling state of a phase. Phases with zero workdays, and phases of a
/// schedule whose dates have not been computed yet, are `Unscheduled`; only
/// the forward pass produces `Scheduled` spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseDates {
    Unscheduled,
    Scheduled(DateSpan),
}

/// One named unit of construction work (a trade task) with a duration in
/// workdays. The color is a display tag, opaque to scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub workdays: i64,
    pub color: String,
    pub dates: PhaseDates,
}

impl Phase {
    pub fn new(name: impl Into<String>, workdays: i64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workdays,
            color: color.into(),
            dates: PhaseDates::Unscheduled,
        }
    }

    /// A phase participates in the timeline only when it has workdays.
    pub fn is_active(&self) -> bool {
        self.workdays > 0
    }

    pub fn span(&self) -> Option<DateSpan> {
        match self.dates {
            PhaseDates::Scheduled(span) => Some(span),
            PhaseDates::Unscheduled => None,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.span().map(|s| s.start)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.span().map(|s| s.end)
    }
}

pub(crate) fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}
