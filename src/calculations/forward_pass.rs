use chrono::NaiveDate;

use crate::calendar;
use crate::phase::{DateSpan, Phase, PhaseDates};

/// Sequential forward layout: phases run back-to-back in list order along
/// the work-day axis, with no gaps and no overlaps. Zero-workday phases are
/// passed through unscheduled and contribute no days.
pub struct ForwardPass<'a> {
    phases: &'a [Phase],
}

impl<'a> ForwardPass<'a> {
    pub fn new(phases: &'a [Phase]) -> Self {
        Self { phases }
    }

    /// Assign start/end dates to every active phase, beginning at the first
    /// work day at or after `project_start`. Deterministic and idempotent.
    pub fn execute(&self, project_start: NaiveDate) -> Vec<Phase> {
        let mut cursor = calendar::snap_to_work_day(project_start);
        let mut scheduled = Vec::with_capacity(self.phases.len());

        for phase in self.phases {
            let mut phase = phase.clone();
            if !phase.is_active() {
                phase.dates = PhaseDates::Unscheduled;
                scheduled.push(phase);
                continue;
            }

            let start = cursor;
            let end = calendar::nth_work_day(start, phase.workdays);
            phase.dates = PhaseDates::Scheduled(DateSpan::new(start, end));
            cursor = calendar::next_work_day(end);
            scheduled.push(phase);
        }

        scheduled
    }
}
