pub mod calculations;
pub mod calendar;
pub mod export;
pub mod grid;
pub mod metadata;
pub mod persistence;
pub mod phase;
pub mod schedule;

#[cfg(feature = "http_api")]
pub mod http_api;

pub use calculations::forward_pass::ForwardPass;
pub use calculations::mutations::{Edit, EditError, EditOutcome, ResizePolicy};
pub use export::{schedule_to_html, schedule_to_ics};
pub use grid::{MonthGrid, Segment, WeekRow, month_grid};
pub use metadata::ScheduleMetadata;
pub use persistence::{
    PersistenceError, ScheduleStore, load_schedule_from_csv, load_schedule_from_json,
    save_schedule_to_csv, save_schedule_to_json,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteScheduleStore;
pub use phase::{DateSpan, Phase, PhaseDates};
pub use schedule::{RefreshSummary, Schedule};
