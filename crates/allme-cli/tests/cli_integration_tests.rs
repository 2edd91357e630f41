//! Black-box tests for the allme binary: each test gets its own temporary
//! database via the ALLME_DATABASE environment variable.

use predicates::prelude::*;

mod helpers;
use helpers::{extract_id, extract_row_id, CliTestHarness};

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("allme"))
        .stdout(predicate::str::contains("recurring"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("allme"));

    harness
        .run_failure(&["frobnicate"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_add_and_list_plain_task() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&[
            "add",
            "Write report",
            "--due",
            "2026-09-01",
            "--start",
            "09:00",
            "--end",
            "10:30",
            "--priority",
            "high",
        ])
        .stdout(predicate::str::contains("Created task"));

    let listing = harness.run_and_read(&["list"]);
    assert!(listing.contains("Write report"));
    assert!(listing.contains("2026-09-01"));
    assert!(listing.contains("09:00-10:30"));
    assert!(listing.contains("high"));
}

#[test]
fn test_add_rejects_malformed_input() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["add", "Bad date", "--due", "next tuesday"])
        .stderr(predicate::str::contains("Invalid date"));

    harness
        .run_failure(&["add", "Bad time", "--due", "2026-09-01", "--start", "9am"])
        .stderr(predicate::str::contains("Invalid time"));

    harness
        .run_failure(&["add", "Bad priority", "--due", "2026-09-01", "--priority", "urgent"])
        .stderr(predicate::str::contains("Invalid priority"));

    // End before start is caught by core validation.
    harness
        .run_failure(&[
            "add",
            "Backwards",
            "--due",
            "2026-09-01",
            "--start",
            "10:00",
            "--end",
            "09:00",
        ])
        .stderr(predicate::str::contains("end time"));

    // A plain task needs a due date.
    harness
        .run_failure(&["add", "Floating task"])
        .stderr(predicate::str::contains("due date"));
}

#[test]
fn test_complete_task_by_short_id() {
    let harness = CliTestHarness::new();

    harness.run_success(&["add", "Quick chore", "--due", "2026-09-01"]);

    // The list table shows an 8-character prefix; with a single task it is
    // unambiguous.
    let listing = harness.run_and_read(&["list"]);
    let short_id = extract_row_id(&listing, "Quick chore");

    harness
        .run_success(&["done", &short_id])
        .stdout(predicate::str::contains("Completed"));

    let listing = harness.run_and_read(&["list"]);
    assert!(listing.contains("done"));
}

#[test]
fn test_recurring_series_lifecycle() {
    let harness = CliTestHarness::new();

    let output = harness.run_and_read(&[
        "add",
        "Water the plants",
        "--on",
        "mon,wed",
    ]);
    assert!(output.contains("Created recurring task"));
    assert!(output.contains("occurrences materialized"));
    let series_id = extract_id(&output);

    // Occurrences show up as visible recurring rows.
    let listing = harness.run_and_read(&["list"]);
    assert!(listing.contains("Water the plants"));
    assert!(listing.contains("↻"));

    // Complete the whole series, addressed by the full series id.
    harness
        .run_success(&["done", &series_id, "--series"])
        .stdout(predicate::str::contains("Completed series"));

    // A second pass updates nothing but still succeeds.
    harness
        .run_success(&["done", &series_id, "--series"])
        .stdout(predicate::str::contains("0 records updated"));

    // Delete everything, template included.
    harness
        .run_success(&["delete", &series_id, "--series", "--force"])
        .stdout(predicate::str::contains("Deleted series"));

    let listing = harness.run_and_read(&["list"]);
    assert!(listing.contains("No tasks found"));
}

#[test]
fn test_recurring_add_rejects_bad_weekdays() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["add", "Busted", "--on", "mon,funday"])
        .stderr(predicate::str::contains("Invalid weekday"));
}

#[test]
fn test_day_view_lays_out_overlaps() {
    let harness = CliTestHarness::new();

    harness.run_success(&[
        "add", "Deep work", "--due", "2026-09-01", "--start", "09:00", "--end", "10:00",
    ]);
    harness.run_success(&[
        "add", "Standup", "--due", "2026-09-01", "--start", "09:30", "--end", "09:45",
    ]);
    harness.run_success(&["add", "Errands", "--due", "2026-09-01"]);

    let day = harness.run_and_read(&["day", "2026-09-01"]);
    assert!(day.contains("All day"));
    assert!(day.contains("Errands"));
    assert!(day.contains("Timeline"));
    assert!(day.contains("09:00-10:00"));
    // Overlapping tasks report their lane out of the shared column count.
    assert!(day.contains("[1/2]"));
    assert!(day.contains("[2/2]"));
}

#[test]
fn test_day_view_empty() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["day", "2026-09-01"])
        .stdout(predicate::str::contains("Nothing scheduled"));
}

#[test]
fn test_done_unknown_id_fails() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["done", "deadbeef"])
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_extend_requires_series() {
    let harness = CliTestHarness::new();

    let output = harness.run_and_read(&["add", "One-off", "--due", "2026-09-01"]);
    let id = extract_id(&output);

    harness
        .run_failure(&["extend", &id])
        .stderr(predicate::str::contains("not part of a recurring series"));
}
