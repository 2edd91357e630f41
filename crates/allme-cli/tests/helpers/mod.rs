use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness running the binary against a temporary database.
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        Self { temp_dir, db_path }
    }

    /// A Command wired to the temporary database and a fixed owner.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("allme").expect("Failed to find allme binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env("ALLME_DATABASE", &self.db_path);
        cmd.env("ALLME_OWNER", "tester");
        cmd
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Runs a command and returns its stdout with ANSI styling removed.
    pub fn run_and_read(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run allme");
        assert!(output.status.success(), "command {:?} failed", args);
        strip_ansi(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Drops `ESC [ ... m` style sequences so output can be parsed as text.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Pulls the short id out of an `→ Task ID: xxxxxxxx` (or Series ID) line.
pub fn extract_id(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.split("ID:").nth(1))
        .map(|id| id.trim().to_string())
        .expect("no ID line in output")
}

/// Pulls the short id out of the list-table row whose title matches.
pub fn extract_row_id(listing: &str, title: &str) -> String {
    listing
        .lines()
        .find(|line| line.contains(title))
        .and_then(|line| line.split('|').nth(1))
        .map(|cell| cell.trim().to_string())
        .expect("no matching table row")
}
