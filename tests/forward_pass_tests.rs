use chrono::NaiveDate;
use siteplan::{ForwardPass, Phase, Schedule, ScheduleMetadata, calendar};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn build(start: NaiveDate, phases: Vec<Phase>) -> Schedule {
    let mut metadata = ScheduleMetadata::default();
    metadata.project_start_date = start;
    Schedule::from_template(metadata, phases)
}

#[test]
fn single_phase_counts_the_start_day() {
    // Friday 2025-01-03 is a work day; five work days are
    // Fri, Mon, Tue, Wed, Thu.
    let schedule = build(d(2025, 1, 3), vec![Phase::new("Framing Crew", 5, "#b45309")]);

    let phase = &schedule.phases()[0];
    assert_eq!(phase.start_date(), Some(d(2025, 1, 3)));
    assert_eq!(phase.end_date(), Some(d(2025, 1, 9)));
}

#[test]
fn zero_workday_phases_are_skipped_entirely() {
    let schedule = build(
        d(2025, 6, 2), // Monday
        vec![
            Phase::new("A", 3, "#111"),
            Phase::new("B", 0, "#222"),
            Phase::new("C", 2, "#333"),
        ],
    );

    let phases = schedule.phases();
    assert_eq!(phases[0].start_date(), Some(d(2025, 6, 2)));
    assert_eq!(phases[0].end_date(), Some(d(2025, 6, 4)));
    assert_eq!(phases[1].span(), None);
    // C starts the next work day after A; B contributes no days.
    assert_eq!(phases[2].start_date(), Some(d(2025, 6, 5)));
    assert_eq!(phases[2].end_date(), Some(d(2025, 6, 6)));
}

#[test]
fn schedule_never_begins_on_a_non_work_day() {
    // 2025-01-01 is New Year's Day (Wednesday).
    let schedule = build(d(2025, 1, 1), vec![Phase::new("Demo", 2, "#444")]);
    assert_eq!(schedule.phases()[0].start_date(), Some(d(2025, 1, 2)));
    assert_eq!(schedule.phases()[0].end_date(), Some(d(2025, 1, 3)));
}

#[test]
fn independence_day_weekend_is_skipped() {
    // Thursday 2025-07-03; Jul 4 is a holiday Friday.
    let schedule = build(
        d(2025, 7, 3),
        vec![Phase::new("Inspection", 1, "#555"), Phase::new("Pour", 2, "#666")],
    );

    let phases = schedule.phases();
    assert_eq!(phases[0].start_date(), Some(d(2025, 7, 3)));
    assert_eq!(phases[0].end_date(), Some(d(2025, 7, 3)));
    assert_eq!(phases[1].start_date(), Some(d(2025, 7, 7))); // Monday
    assert_eq!(phases[1].end_date(), Some(d(2025, 7, 8)));
}

#[test]
fn thanksgiving_block_is_skipped() {
    // Mon 2025-11-24; Thu/Fri are Thanksgiving and the day after.
    let schedule = build(d(2025, 11, 24), vec![Phase::new("Drywall", 5, "#777")]);

    let phase = &schedule.phases()[0];
    assert_eq!(phase.start_date(), Some(d(2025, 11, 24)));
    assert_eq!(phase.end_date(), Some(d(2025, 12, 2)));
}

#[test]
fn scheduled_endpoints_are_always_work_days() {
    let schedule = build(
        d(2025, 12, 19), // Friday before the Christmas window
        vec![
            Phase::new("Trim", 4, "#888"),
            Phase::new("Paint", 6, "#999"),
            Phase::new("Punch List", 3, "#aaa"),
        ],
    );

    for phase in schedule.phases() {
        let span = phase.span().unwrap();
        assert!(calendar::is_work_day(span.start), "{} starts on {}", phase.name, span.start);
        assert!(calendar::is_work_day(span.end), "{} ends on {}", phase.name, span.end);
        assert_eq!(
            calendar::count_work_days(span.start, span.end),
            phase.workdays,
            "workday count mismatch for {}",
            phase.name
        );
    }
}

#[test]
fn phases_are_laid_out_back_to_back() {
    let schedule = build(
        d(2025, 3, 3),
        vec![
            Phase::new("A", 4, "#111"),
            Phase::new("B", 0, "#222"),
            Phase::new("C", 7, "#333"),
            Phase::new("D", 2, "#444"),
        ],
    );

    let scheduled: Vec<_> = schedule.phases().iter().filter_map(|p| p.span()).collect();
    for pair in scheduled.windows(2) {
        assert_eq!(pair[1].start, calendar::next_work_day(pair[0].end));
    }
}

#[test]
fn forward_pass_is_idempotent() {
    let phases = vec![
        Phase::new("A", 3, "#111"),
        Phase::new("B", 0, "#222"),
        Phase::new("C", 5, "#333"),
    ];
    let first = ForwardPass::new(&phases).execute(d(2025, 5, 20));
    let second = ForwardPass::new(&first).execute(d(2025, 5, 20));
    assert_eq!(first, second);
}

#[test]
fn total_duration_spans_project_start_through_last_end() {
    let schedule = build(
        d(2025, 1, 6),
        vec![Phase::new("A", 2, "#111"), Phase::new("B", 3, "#222")],
    );
    // A: Jan 6-7, B: Jan 8-10 -> 5 calendar days from Jan 6.
    assert_eq!(schedule.total_duration_days(), Some(5));
}

#[test]
fn total_duration_is_none_when_nothing_scheduled() {
    let schedule = build(d(2025, 1, 6), vec![Phase::new("A", 0, "#111")]);
    assert_eq!(schedule.total_duration_days(), None);
}
