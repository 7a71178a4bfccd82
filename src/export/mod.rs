pub mod html;
pub mod ics;

pub use html::schedule_to_html;
pub use ics::schedule_to_ics;
