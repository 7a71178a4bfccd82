use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// True iff the date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Name of the company holiday the date falls on, if any.
///
/// The holiday set is fixed: New Year's Day, Memorial Day, Independence Day,
/// Labor Day, Thanksgiving and the day after, and Dec 24-26. Floating
/// holidays are derived from the input date's own year, so any year works.
pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    match (date.month(), date.day()) {
        (1, 1) => return Some("New Year's Day"),
        (7, 4) => return Some("Independence Day"),
        (12, 24) => return Some("Christmas Eve"),
        (12, 25) => return Some("Christmas Day"),
        (12, 26) => return Some("Day After Christmas"),
        _ => {}
    }

    let year = date.year();
    match date.month() {
        5 => {
            if date == last_weekday(year, 5, Weekday::Mon) {
                return Some("Memorial Day");
            }
        }
        9 => {
            if date == nth_weekday(year, 9, Weekday::Mon, 1) {
                return Some("Labor Day");
            }
        }
        11 => {
            let thanksgiving = nth_weekday(year, 11, Weekday::Thu, 4);
            if date == thanksgiving {
                return Some("Thanksgiving");
            }
            if date == thanksgiving + Duration::days(1) {
                return Some("Day After Thanksgiving");
            }
        }
        _ => {}
    }
    None
}

pub fn is_holiday(date: NaiveDate) -> bool {
    holiday_name(date).is_some()
}

/// A work day is any weekday that is not a holiday.
pub fn is_work_day(date: NaiveDate) -> bool {
    !is_weekend(date) && !is_holiday(date)
}

pub fn is_non_work_day(date: NaiveDate) -> bool {
    !is_work_day(date)
}

/// First work day at or after the given date.
pub fn snap_to_work_day(from: NaiveDate) -> NaiveDate {
    let mut current = from;
    while !is_work_day(current) {
        current = current + Duration::days(1);
    }
    current
}

/// First work day strictly after the given date.
pub fn next_work_day(from: NaiveDate) -> NaiveDate {
    snap_to_work_day(from + Duration::days(1))
}

/// The nth work day counting `snap_to_work_day(start)` as the first.
///
/// A phase starting on a work day with one workday ends that same day.
/// `n` must be at least 1.
pub fn nth_work_day(start: NaiveDate, n: i64) -> NaiveDate {
    let mut current = snap_to_work_day(start);
    let mut counted = 1;
    while counted < n {
        current = next_work_day(current);
        counted += 1;
    }
    current
}

/// Count of work days in the inclusive range `[start, end]`.
pub fn count_work_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut current = start;
    while current <= end {
        if is_work_day(current) {
            count += 1;
        }
        current = current + Duration::days(1);
    }
    count
}

/// Find the nth occurrence of a weekday in a month. Only called with
/// combinations that exist in every year (n <= 4).
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
    let mut date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let mut count = 0;
    loop {
        if date.weekday() == weekday {
            count += 1;
            if count == n {
                return date;
            }
        }
        date = date + Duration::days(1);
    }
}

/// Find the last occurrence of a weekday in a month.
fn last_weekday(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let mut date = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    date = date - Duration::days(1); // Last day of the month
    while date.weekday() != weekday {
        date = date - Duration::days(1);
    }
    date
}
