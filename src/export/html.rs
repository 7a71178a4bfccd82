use crate::schedule::Schedule;

/// Render the schedule as a printable standalone HTML document. Pure
/// formatting; carries no scheduling logic.
pub fn schedule_to_html(schedule: &Schedule) -> String {
    let metadata = schedule.metadata();

    let mut rows = String::new();
    for phase in schedule.phases() {
        let (start, end) = match phase.span() {
            Some(span) => (
                span.start.format("%Y-%m-%d").to_string(),
                span.end.format("%Y-%m-%d").to_string(),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        rows.push_str(&format!(
            "      <tr>\n        <td><span class=\"swatch\" style=\"background:{}\"></span>{}</td>\n        <td>{}</td>\n        <td>{}</td>\n        <td>{}</td>\n      </tr>\n",
            escape(&phase.color),
            escape(&phase.name),
            phase.workdays,
            start,
            end,
        ));
    }

    let duration = match schedule.total_duration_days() {
        Some(days) => format!("{days} calendar days"),
        None => "not yet scheduled".to_string(),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n  body {{ font-family: sans-serif; margin: 2rem; }}\n  table {{ border-collapse: collapse; width: 100%; }}\n  th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}\n  .swatch {{ display: inline-block; width: 0.8rem; height: 0.8rem; margin-right: 0.4rem; border: 1px solid #999; }}\n  @media print {{ body {{ margin: 0; }} }}\n</style>\n</head>\n<body>\n  <h1>{title}</h1>\n  <p>{description}</p>\n  <p>Start date: {start} &mdash; total duration: {duration}</p>\n  <table>\n    <thead>\n      <tr><th>Phase</th><th>Workdays</th><th>Start</th><th>End</th></tr>\n    </thead>\n    <tbody>\n{rows}    </tbody>\n  </table>\n</body>\n</html>\n",
        title = escape(&metadata.project_name),
        description = escape(&metadata.project_description),
        start = metadata.project_start_date.format("%Y-%m-%d"),
        duration = duration,
        rows = rows,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
