use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_add_command_schedules_the_phase() {
    run_cli("start 2025-01-06\nadd Framing 5\nquit\n")
        .success()
        .stdout(str_contains("Framing"))
        .stdout(str_contains("2025-01-10"))
        .stdout(str_contains("total duration: 5 calendar days"));
}

#[test]
fn cli_rm_command_removes_phase() {
    run_cli("start 2025-01-06\nadd Framing 5\nadd Roofing 3\nrm Roofing\nrm Roofing\nquit\n")
        .success()
        .stdout(str_contains("no phase named 'Roofing'"));
}

#[test]
fn cli_move_command_reports_the_new_dates() {
    // Moving Roofing from Jan 13 to Jan 20 re-dates it in the table.
    run_cli("start 2025-01-06\nadd Framing 5\nadd Roofing 3\nmove Roofing 2025-01-20\nquit\n")
        .success()
        .stdout(str_contains("2025-01-22"));
}

#[test]
fn cli_resize_does_not_move_later_phases() {
    let assert = run_cli(
        "start 2025-01-06\nadd Framing 5\nadd Roofing 3\nresize Framing 7\nquit\n",
    )
    .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let after_resize = output.rsplit("2025-01-14").next().unwrap_or_default();
    // Roofing keeps its Jan 13 start even though Framing now ends Jan 14.
    assert!(
        output.contains("2025-01-14"),
        "expected the resized end date in the table:\n{output}"
    );
    assert!(
        after_resize.contains("2025-01-13"),
        "expected the downstream start to stay put:\n{output}"
    );
}

#[test]
fn cli_save_and_load_json_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!(
        "start 2025-01-06\nadd Framing 5\nsave {}\nadd Temp 1\nload {}\nshow\nquit\n",
        path, path
    );
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        output.contains(&format!("saved to {path}")),
        "expected save confirmation:\n{output}"
    );
    let after_reload = output.rsplit("saved to").next().unwrap_or_default();
    assert!(
        after_reload.contains("Framing"),
        "expected persisted phase to remain:\n{after_reload}"
    );
    let final_show = after_reload.rsplit("> ").nth(1).unwrap_or_default();
    assert!(
        !final_show.contains("Temp"),
        "temporary phase should not survive the reload:\n{final_show}"
    );
}

#[test]
fn cli_grid_command_lists_week_segments() {
    run_cli("start 2025-01-06\nadd Framing 8\ngrid 2025-01\nquit\n")
        .success()
        .stdout(str_contains("week of 2025-01-06"))
        .stdout(str_contains("col 0..4  Framing"))
        .stdout(str_contains("col 0..2  ..."));
}

#[test]
fn cli_rejects_unknown_commands() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("unknown command 'frobnicate'"));
}
