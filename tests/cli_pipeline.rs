#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn nettwin_with_db(db_path: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nettwin"));
    cmd.env("NETTWIN_DB_PATH", db_path);
    cmd.env_remove("NETTWIN_CREW_PATH");
    cmd.env_remove("NETTWIN_DEBUG");
    cmd
}

fn write_crew(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("crew.toml");
    std::fs::write(&path, body).unwrap();
    path
}

fn read_records(db_path: &Path) -> Vec<nettwin::logbook::Record> {
    let conn = nettwin::logbook::open_db(db_path).unwrap();
    nettwin::logbook::read_all(&conn).unwrap()
}

const ECHO_CREW: &str = r#"
[[agents]]
name = "scout"
role = "Scout"
goal = "Look around"
backstory = "Eyes everywhere."

[[tasks]]
name = "survey"
description = "Survey the segment."
expected_output = "A segment map."
agent = "scout"

[[tasks.actions]]
command = "echo alpha"
log_output = true

[[tasks.actions]]
command = "echo beta"
"#;

// ---------------------------------------------------------------------------
// pipeline runs
// ---------------------------------------------------------------------------

#[test]
fn pipeline_logs_flagged_actions_only() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("logbook.db");
    let crew = write_crew(dir.path(), ECHO_CREW);

    let out = nettwin_with_db(&db)
        .env("NETTWIN_CREW_PATH", &crew)
        .output()
        .expect("nettwin");
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success(), "exit: {:?}", out.status.code());
    assert!(stdout.contains("Pipeline run:"), "got: {stdout}");
    assert!(stdout.contains("$ echo alpha (exit 0, logged)"));
    assert!(stdout.contains("$ echo beta (exit 0)"));

    let records = read_records(&db);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].command, "echo alpha");
    assert_eq!(records[0].output, "alpha");
}

#[test]
fn repeated_pipeline_runs_append() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("logbook.db");
    let crew = write_crew(dir.path(), ECHO_CREW);

    for _ in 0..2 {
        let out = nettwin_with_db(&db)
            .env("NETTWIN_CREW_PATH", &crew)
            .output()
            .expect("nettwin");
        assert!(out.status.success());
    }

    let records = read_records(&db);
    assert_eq!(records.len(), 2);
    assert!(records[0].id < records[1].id);
}

#[test]
fn pipeline_reports_skipped_reasoning_tasks() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("logbook.db");
    let crew = write_crew(
        dir.path(),
        r#"
[[agents]]
name = "thinker"
role = "Thinker"
goal = "Reason"
backstory = "All theory."

[[tasks]]
name = "ponder"
description = "Ponder the layout."
expected_output = "A plan."
agent = "thinker"
"#,
    );

    let out = nettwin_with_db(&db)
        .env("NETTWIN_CREW_PATH", &crew)
        .output()
        .expect("nettwin");
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success());
    assert!(
        stdout.contains("skipped: no executable actions; this step needs an agent backend"),
        "got: {stdout}"
    );
    assert!(stdout.contains("1 task(s) processed, 0 command output(s) logged."));
    assert!(read_records(&db).is_empty());
}

#[test]
fn pipeline_runs_builtin_crew_by_default() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("logbook.db");

    let out = nettwin_with_db(&db).output().expect("nettwin");
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success(), "exit: {:?}", out.status.code());
    assert!(stdout.contains("Pipeline run: Digital Twin Network Recreation"));
    assert!(stdout.contains(
        "== collect_network_info (Network and Host Information Collector) =="
    ));
    assert!(stdout.contains("4 task(s) processed, 3 command output(s) logged."));

    // The collect commands may fail on a minimal host; their output is
    // logged either way.
    let commands: Vec<String> = read_records(&db).into_iter().map(|r| r.command).collect();
    assert_eq!(commands, ["ifconfig", "netstat", "hostname"]);
}

// ---------------------------------------------------------------------------
// pipeline feeding --challenges
// ---------------------------------------------------------------------------

#[test]
fn pipeline_output_feeds_challenges() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("logbook.db");
    // Stand-in collector with fixed output; the command string still names
    // ifconfig, which is what the challenge rules match on.
    let crew = write_crew(
        dir.path(),
        r#"
[[agents]]
name = "scout"
role = "Scout"
goal = "Look around"
backstory = "Eyes everywhere."

[[tasks]]
name = "survey"
description = "Survey the segment."
expected_output = "A segment map."
agent = "scout"

[[tasks.actions]]
command = "echo 'eth0: 10.0.0.5' # ifconfig stand-in"
log_output = true
"#,
    );

    let run_out = nettwin_with_db(&db)
        .env("NETTWIN_CREW_PATH", &crew)
        .output()
        .expect("nettwin");
    assert!(run_out.status.success());

    let out = nettwin_with_db(&db)
        .arg("--challenges")
        .output()
        .expect("nettwin --challenges");
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success());
    assert!(
        stdout.starts_with(
            "Challenge 1: Analyze the following ifconfig output and identify the IP address:\n\
             eth0: 10.0.0.5"
        ),
        "got: {stdout}"
    );
}

// ---------------------------------------------------------------------------
// failure modes
// ---------------------------------------------------------------------------

#[test]
fn pipeline_fails_when_crew_override_missing() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("logbook.db");

    let out = nettwin_with_db(&db)
        .env("NETTWIN_CREW_PATH", dir.path().join("absent.toml"))
        .output()
        .expect("nettwin");
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert_eq!(out.status.code(), Some(1), "expected exit 1");
    assert!(
        stderr.contains("[nettwin] error:") && stderr.contains("crew file not found"),
        "got: {stderr}"
    );
}

#[test]
fn pipeline_rejects_crew_with_unknown_agent() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("logbook.db");
    let crew = write_crew(
        dir.path(),
        r#"
[[agents]]
name = "scout"
role = "Scout"
goal = "Look around"
backstory = "Eyes everywhere."

[[tasks]]
name = "survey"
description = "Survey the segment."
expected_output = "A segment map."
agent = "ghost"
"#,
    );

    let out = nettwin_with_db(&db)
        .env("NETTWIN_CREW_PATH", &crew)
        .output()
        .expect("nettwin");
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert_eq!(out.status.code(), Some(1), "expected exit 1");
    assert!(
        stderr.contains("unknown agent `ghost`"),
        "got: {stderr}"
    );
}
