use std::io::{self, Write};

use chrono::{Duration, NaiveDate};
use polars::prelude::{AnyValue, DataFrame};
use siteplan::calculations::mutations::{self, Edit, EditOutcome};
use siteplan::{
    Phase, Schedule, grid, load_schedule_from_json, save_schedule_to_json, schedule_to_html,
    schedule_to_ics,
};

fn format_any_value(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Date(days) => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            (epoch + Duration::days(*days as i64))
                .format("%Y-%m-%d")
                .to_string()
        }
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    // Compute column widths
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            if let Ok(ref av) = col.get(row_idx) {
                let s = format_any_value(av);
                if s.len() > widths[ci] {
                    widths[ci] = s.len();
                }
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row_idx in 0..df.height() {
        out.push('|');
        for (ci, col) in columns.iter().enumerate() {
            let s = col
                .get(row_idx)
                .map(|av| format_any_value(&av))
                .unwrap_or_default();
            out.push(' ');
            out.push_str(&s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current schedule\n  start <YYYY-MM-DD>                 Set project start date and recompute\n  add <name> <workdays> [color]      Upsert a phase (quotes not supported; use - for spaces)\n  rm <name>                          Remove a phase\n  resize <name> <workdays>           Resize a phase (end date only; no cascade)\n  move <name> <YYYY-MM-DD>           Move a phase; later phases shift with it\n  reorder <from> <to>                Move phase at index <from> to index <to>\n  grid <YYYY-MM>                     Show the month grid segments\n  compute                            Recompute all dates from the start date\n  save <path.json>                   Save schedule snapshot\n  load <path.json>                   Load schedule snapshot\n  ics <path>                         Export iCalendar file\n  html <path>                        Export printable HTML file\n  quit|exit                          Exit"
    );
}

fn print_show(schedule: &Schedule) {
    match schedule.to_dataframe() {
        Ok(df) => print!("{}", render_df_as_text_table(&df)),
        Err(err) => println!("error rendering schedule: {err}"),
    }
    match schedule.total_duration_days() {
        Some(days) => println!("total duration: {days} calendar days"),
        None => println!("total duration: not yet scheduled"),
    }
}

fn print_grid(schedule: &Schedule, year: i32, month: u32) {
    let Some(grid) = grid::month_grid(year, month, schedule.phases()) else {
        println!("invalid month {year}-{month}");
        return;
    };
    for week in &grid.weeks {
        println!("week of {}", week.monday.format("%Y-%m-%d"));
        for segment in &week.segments {
            let name = schedule
                .phase(segment.phase_index)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            let label = if segment.is_phase_start { name } else { "..." };
            println!(
                "  col {}..{}  {}",
                segment.start_column,
                segment.start_column + segment.columns - 1,
                label
            );
        }
    }
}

fn apply_and_report(schedule: &mut Schedule, edit: Edit) {
    match mutations::apply(schedule, edit) {
        Ok(EditOutcome::Changed(updated)) => {
            *schedule = updated;
            print_show(schedule);
        }
        Ok(EditOutcome::Unchanged) => println!("no change"),
        Err(err) => println!("error: {err}"),
    }
}

fn main() {
    let mut schedule = Schedule::new();

    println!("siteplan (CLI) - type 'help' for commands\n");
    print_show(&schedule);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        if line.is_empty() {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "show" => {
                print_show(&schedule);
            }
            "start" => match parts.next().map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d")) {
                Some(Ok(date)) => {
                    let mut metadata = schedule.metadata().clone();
                    metadata.project_start_date = date;
                    schedule.set_metadata(metadata);
                    schedule.refresh();
                    print_show(&schedule);
                }
                _ => println!("usage: start <YYYY-MM-DD>"),
            },
            "add" => {
                let name = parts.next();
                let workdays = parts.next().and_then(|s| s.parse::<i64>().ok());
                let color = parts.next().unwrap_or("#64748b");
                match (name, workdays) {
                    (Some(name), Some(workdays)) if workdays >= 0 => {
                        schedule.upsert_phase(Phase::new(name, workdays, color));
                        print_show(&schedule);
                    }
                    _ => println!("usage: add <name> <workdays> [color]"),
                }
            }
            "rm" => match parts.next() {
                Some(name) => {
                    if schedule.remove_phase(name) {
                        print_show(&schedule);
                    } else {
                        println!("no phase named '{name}'");
                    }
                }
                None => println!("usage: rm <name>"),
            },
            "resize" => {
                let name = parts.next();
                let workdays = parts.next().and_then(|s| s.parse::<i64>().ok());
                match (name, workdays) {
                    (Some(name), Some(workdays)) => match schedule.find_phase(name) {
                        Some((index, _)) => {
                            apply_and_report(&mut schedule, Edit::Resize { index, workdays });
                        }
                        None => println!("no phase named '{name}'"),
                    },
                    _ => println!("usage: resize <name> <workdays>"),
                }
            }
            "move" => {
                let name = parts.next();
                let date = parts
                    .next()
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
                match (name, date) {
                    (Some(name), Some(start)) => match schedule.find_phase(name) {
                        Some((index, _)) => {
                            apply_and_report(&mut schedule, Edit::Move { index, start });
                        }
                        None => println!("no phase named '{name}'"),
                    },
                    _ => println!("usage: move <name> <YYYY-MM-DD>"),
                }
            }
            "reorder" => {
                let from = parts.next().and_then(|s| s.parse::<usize>().ok());
                let to = parts.next().and_then(|s| s.parse::<usize>().ok());
                match (from, to) {
                    (Some(from), Some(to)) => {
                        apply_and_report(&mut schedule, Edit::Reorder { from, to });
                    }
                    _ => println!("usage: reorder <from> <to>"),
                }
            }
            "grid" => {
                let parsed = parts.next().and_then(|s| {
                    let (y, m) = s.split_once('-')?;
                    Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?))
                });
                match parsed {
                    Some((year, month)) => print_grid(&schedule, year, month),
                    None => println!("usage: grid <YYYY-MM>"),
                }
            }
            "compute" => {
                let summary = schedule.refresh();
                println!(
                    "scheduled {} phase(s), total duration {:?}",
                    summary.scheduled_phases, summary.total_duration_days
                );
                print_show(&schedule);
            }
            "save" => match parts.next() {
                Some(path) => match save_schedule_to_json(&schedule, path) {
                    Ok(()) => println!("saved to {path}"),
                    Err(err) => println!("error: {err}"),
                },
                None => println!("usage: save <path.json>"),
            },
            "load" => match parts.next() {
                Some(path) => match load_schedule_from_json(path) {
                    Ok(loaded) => {
                        schedule = loaded;
                        print_show(&schedule);
                    }
                    Err(err) => println!("error: {err}"),
                },
                None => println!("usage: load <path.json>"),
            },
            "ics" => match parts.next() {
                Some(path) => match std::fs::write(path, schedule_to_ics(&schedule)) {
                    Ok(()) => println!("exported to {path}"),
                    Err(err) => println!("error: {err}"),
                },
                None => println!("usage: ics <path>"),
            },
            "html" => match parts.next() {
                Some(path) => match std::fs::write(path, schedule_to_html(&schedule)) {
                    Ok(()) => println!("exported to {path}"),
                    Err(err) => println!("error: {err}"),
                },
                None => println!("usage: html <path>"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command '{other}' - type 'help'"),
        }
    }
}
