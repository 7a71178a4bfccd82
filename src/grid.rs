use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// Weekend days are not rendered; every week row has five columns, Monday
/// through Friday.
pub const WEEKDAY_COLUMNS: usize = 5;

/// The part of one phase's bar that falls within a single week row. A phase
/// spanning several weeks yields one segment per week; `is_phase_start` is
/// true only in the week holding the phase's actual start date, which is
/// where the label gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub phase_index: usize,
    pub start_column: usize,
    pub columns: usize,
    pub is_phase_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRow {
    pub monday: NaiveDate,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<WeekRow>,
}

/// Map scheduled phases onto a month of Monday-started week rows. Derived
/// state: recomputed from the schedule on demand, holds no invariants of
/// its own. Returns `None` for an invalid month number.
pub fn month_grid(year: i32, month: u32, phases: &[Phase]) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    } - Duration::days(1);

    let mut monday = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    let mut weeks = Vec::new();

    while monday <= last {
        let friday = monday + Duration::days(4);
        let mut segments = Vec::new();

        for (phase_index, phase) in phases.iter().enumerate() {
            let Some(span) = phase.span() else {
                continue;
            };
            // Span endpoints are work days, so the clamped range sits
            // entirely inside the Mon-Fri columns.
            let seg_start = span.start.max(monday);
            let seg_end = span.end.min(friday);
            if seg_start > seg_end {
                continue;
            }

            let start_column = (seg_start - monday).num_days() as usize;
            let columns = (seg_end - seg_start).num_days() as usize + 1;
            segments.push(Segment {
                phase_index,
                start_column,
                columns,
                is_phase_start: span.start >= monday,
            });
        }

        weeks.push(WeekRow { monday, segments });
        monday = monday + Duration::days(7);
    }

    Some(MonthGrid { year, month, weeks })
}
