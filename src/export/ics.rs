use crate::schedule::Schedule;

/// Render the schedule as an iCalendar document: one VEVENT per scheduled
/// phase, 9am on its start date through 5pm on its end date. Pure
/// formatting over the computed schedule; unscheduled phases are skipped.
pub fn schedule_to_ics(schedule: &Schedule) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, "PRODID:-//siteplan//Construction Schedule//EN");
    push_line(&mut out, "CALSCALE:GREGORIAN");

    for phase in schedule.phases() {
        let Some(span) = phase.span() else {
            continue;
        };
        let start = span.start.format("%Y%m%d");
        let end = span.end.format("%Y%m%d");
        push_line(&mut out, "BEGIN:VEVENT");
        // Deterministic UID so re-exports of the same schedule match.
        push_line(&mut out, &format!("UID:{}-{start}@siteplan", slug(&phase.name)));
        push_line(&mut out, &format!("DTSTAMP:{start}T090000Z"));
        push_line(&mut out, &format!("DTSTART:{start}T090000"));
        push_line(&mut out, &format!("DTEND:{end}T170000"));
        push_line(&mut out, &format!("SUMMARY:{}", escape_text(&phase.name)));
        push_line(&mut out, &format!("DESCRIPTION:{} workdays", phase.workdays));
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

// RFC 5545 wants CRLF line endings.
fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str("\r\n");
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
