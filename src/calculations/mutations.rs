use chrono::{Duration, NaiveDate};
use std::fmt;

use crate::calculations::forward_pass::ForwardPass;
use crate::calendar;
use crate::phase::{DateSpan, PhaseDates};
use crate::schedule::Schedule;

/// Whether a resize shifts the phases scheduled after the resized one.
///
/// The drag UI this engine was written for cascades on move but not on
/// resize, so `Isolated` is the default; `Cascade` re-lays downstream
/// phases back-to-back from the new end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    #[default]
    Isolated,
    Cascade,
}

/// An interactive edit, already translated out of pointer coordinates by
/// the caller: a list reorder, a proposed workday count, or a proposed new
/// start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Reorder { from: usize, to: usize },
    Resize { index: usize, workdays: i64 },
    Move { index: usize, start: NaiveDate },
}

/// Result of applying an edit. `Unchanged` means the edit resolved to the
/// schedule's current state (zero-length drag, drop on the original date);
/// callers skip persistence and emit no event in that case.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Changed(Schedule),
    Unchanged,
}

impl EditOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, EditOutcome::Changed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    PhaseOutOfRange(usize),
    PhaseInactive(usize),
    PhaseUnscheduled(usize),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::PhaseOutOfRange(index) => write!(f, "no phase at index {index}"),
            EditError::PhaseInactive(index) => {
                write!(f, "phase at index {index} has no workdays and cannot be edited")
            }
            EditError::PhaseUnscheduled(index) => {
                write!(f, "phase at index {index} has no computed dates yet")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Translate a dragged end date into a workday count for a `Resize` edit.
/// Counts work days between the phase's unchanged start and the candidate
/// end, with a floor of one workday.
pub fn workdays_for_end(start: NaiveDate, candidate_end: NaiveDate) -> i64 {
    calendar::count_work_days(start, candidate_end).max(1)
}

pub fn apply(schedule: &Schedule, edit: Edit) -> Result<EditOutcome, EditError> {
    apply_with_policy(schedule, edit, ResizePolicy::default())
}

pub fn apply_with_policy(
    schedule: &Schedule,
    edit: Edit,
    policy: ResizePolicy,
) -> Result<EditOutcome, EditError> {
    let updated = match edit {
        Edit::Reorder { from, to } => reorder(schedule, from, to)?,
        Edit::Resize { index, workdays } => resize(schedule, index, workdays, policy)?,
        Edit::Move { index, start } => move_phase(schedule, index, start)?,
    };

    if updated.phases() == schedule.phases() {
        Ok(EditOutcome::Unchanged)
    } else {
        Ok(EditOutcome::Changed(updated))
    }
}

/// Reorder discards every computed date and lays the new order out from
/// scratch. No partial-cascade shortcut; phase lists are small.
fn reorder(schedule: &Schedule, from: usize, to: usize) -> Result<Schedule, EditError> {
    let len = schedule.phases().len();
    if from >= len {
        return Err(EditError::PhaseOutOfRange(from));
    }
    if to >= len {
        return Err(EditError::PhaseOutOfRange(to));
    }

    let mut phases = schedule.phases().to_vec();
    let moved = phases.remove(from);
    phases.insert(to, moved);

    let phases = ForwardPass::new(&phases).execute(schedule.metadata().project_start_date);
    Ok(schedule.with_phases(phases))
}

fn scheduled_span(schedule: &Schedule, index: usize) -> Result<DateSpan, EditError> {
    let phase = schedule
        .phases()
        .get(index)
        .ok_or(EditError::PhaseOutOfRange(index))?;
    if !phase.is_active() {
        // Zero-workday phases are excluded from the drag surface; an edit
        // aimed at one is a caller bug, not a no-op.
        return Err(EditError::PhaseInactive(index));
    }
    phase.span().ok_or(EditError::PhaseUnscheduled(index))
}

fn resize(
    schedule: &Schedule,
    index: usize,
    workdays: i64,
    policy: ResizePolicy,
) -> Result<Schedule, EditError> {
    let span = scheduled_span(schedule, index)?;
    let workdays = workdays.max(1);
    let new_end = calendar::nth_work_day(span.start, workdays);

    let mut phases = schedule.phases().to_vec();
    phases[index].workdays = workdays;
    phases[index].dates = PhaseDates::Scheduled(DateSpan::new(span.start, new_end));

    if policy == ResizePolicy::Cascade {
        let mut cursor = calendar::next_work_day(new_end);
        for (i, phase) in phases.iter_mut().enumerate() {
            if i == index || !phase.is_active() {
                continue;
            }
            let Some(original) = schedule.phases()[i].span() else {
                continue;
            };
            if original.start > span.end {
                let start = cursor;
                let end = calendar::nth_work_day(start, phase.workdays);
                phase.dates = PhaseDates::Scheduled(DateSpan::new(start, end));
                cursor = calendar::next_work_day(end);
            }
        }
    }

    Ok(schedule.with_phases(phases))
}

fn move_phase(
    schedule: &Schedule,
    index: usize,
    proposed_start: NaiveDate,
) -> Result<Schedule, EditError> {
    let span = scheduled_span(schedule, index)?;
    let target = calendar::snap_to_work_day(proposed_start);
    let shift_days = (target - span.start).num_days();
    if shift_days == 0 {
        return Ok(schedule.clone());
    }

    let mut phases = schedule.phases().to_vec();
    let moved_end = calendar::nth_work_day(target, phases[index].workdays);
    phases[index].dates = PhaseDates::Scheduled(DateSpan::new(target, moved_end));

    // Cascade: everything that started strictly after the moved phase's
    // original end shifts by the same calendar delta, each snapped forward
    // to a work day with its end recounted from its own workdays. Phases
    // before or overlapping the original span stay put; the timeline is a
    // simple total order and new overlaps with earlier phases are accepted.
    for (i, phase) in phases.iter_mut().enumerate() {
        if i == index || !phase.is_active() {
            continue;
        }
        let Some(original) = schedule.phases()[i].span() else {
            continue;
        };
        if original.start > span.end {
            let start = calendar::snap_to_work_day(original.start + Duration::days(shift_days));
            let end = calendar::nth_work_day(start, phase.workdays);
            phase.dates = PhaseDates::Scheduled(DateSpan::new(start, end));
        }
    }

    Ok(schedule.with_phases(phases))
}
