use chrono::NaiveDate;
use siteplan::{Phase, Schedule, ScheduleMetadata, grid};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn build(start: NaiveDate, phases: Vec<Phase>) -> Schedule {
    let mut metadata = ScheduleMetadata::default();
    metadata.project_start_date = start;
    Schedule::from_template(metadata, phases)
}

#[test]
fn month_grid_covers_every_intersecting_week() {
    let grid = grid::month_grid(2025, 1, &[]).unwrap();
    // January 2025 starts on a Wednesday; its first week row begins the
    // previous Monday, Dec 30.
    assert_eq!(grid.weeks.first().unwrap().monday, d(2024, 12, 30));
    assert_eq!(grid.weeks.last().unwrap().monday, d(2025, 1, 27));
    assert_eq!(grid.weeks.len(), 5);
}

#[test]
fn invalid_month_yields_none() {
    assert!(grid::month_grid(2025, 13, &[]).is_none());
    assert!(grid::month_grid(2025, 0, &[]).is_none());
}

#[test]
fn multi_week_phase_splits_into_one_segment_per_week() {
    // 8 workdays from Mon Jan 6: Jan 6-10 and Jan 13-15.
    let schedule = build(d(2025, 1, 6), vec![Phase::new("Framing", 8, "#b45309")]);
    let grid = grid::month_grid(2025, 1, schedule.phases()).unwrap();

    let week1 = &grid.weeks[1]; // week of Jan 6
    assert_eq!(week1.monday, d(2025, 1, 6));
    assert_eq!(week1.segments.len(), 1);
    let seg = &week1.segments[0];
    assert_eq!(seg.start_column, 0);
    assert_eq!(seg.columns, 5);
    assert!(seg.is_phase_start);

    let week2 = &grid.weeks[2]; // week of Jan 13
    assert_eq!(week2.segments.len(), 1);
    let seg = &week2.segments[0];
    assert_eq!(seg.start_column, 0);
    assert_eq!(seg.columns, 3);
    assert!(!seg.is_phase_start);

    // No segments before the phase begins or after it ends.
    assert!(grid.weeks[0].segments.is_empty());
    assert!(grid.weeks[3].segments.is_empty());
}

#[test]
fn segment_columns_are_weekday_offsets() {
    // Project start on the New Year's holiday snaps to Thu Jan 2.
    let schedule = build(d(2025, 1, 1), vec![Phase::new("Demo", 2, "#444")]);
    let grid = grid::month_grid(2025, 1, schedule.phases()).unwrap();

    let week0 = &grid.weeks[0]; // week of Dec 30
    assert_eq!(week0.segments.len(), 1);
    let seg = &week0.segments[0];
    // Thu is column 3 of Mon-Fri.
    assert_eq!(seg.start_column, 3);
    assert_eq!(seg.columns, 2);
    assert!(seg.is_phase_start);
}

#[test]
fn phases_sharing_a_week_emit_separate_segments() {
    let schedule = build(
        d(2025, 1, 6),
        vec![Phase::new("A", 2, "#111"), Phase::new("C", 2, "#333")],
    );
    let grid = grid::month_grid(2025, 1, schedule.phases()).unwrap();

    let week = &grid.weeks[1];
    assert_eq!(week.segments.len(), 2);
    assert_eq!(week.segments[0].phase_index, 0);
    assert_eq!(week.segments[0].start_column, 0);
    assert_eq!(week.segments[0].columns, 2);
    assert_eq!(week.segments[1].phase_index, 1);
    assert_eq!(week.segments[1].start_column, 2);
    assert_eq!(week.segments[1].columns, 2);
}

#[test]
fn zero_workday_phases_never_appear_in_the_grid() {
    let schedule = build(
        d(2025, 1, 6),
        vec![Phase::new("A", 2, "#111"), Phase::new("Optional", 0, "#222")],
    );
    let grid = grid::month_grid(2025, 1, schedule.phases()).unwrap();

    for week in &grid.weeks {
        assert!(week.segments.iter().all(|s| s.phase_index == 0));
    }
}

#[test]
fn grid_has_five_columns_per_week() {
    assert_eq!(grid::WEEKDAY_COLUMNS, 5);
    let schedule = build(d(2025, 1, 6), vec![Phase::new("Long", 20, "#111")]);
    let grid = grid::month_grid(2025, 1, schedule.phases()).unwrap();
    for week in &grid.weeks {
        for seg in &week.segments {
            assert!(seg.start_column + seg.columns <= grid::WEEKDAY_COLUMNS);
        }
    }
}
