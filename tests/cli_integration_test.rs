//! Runs the `pager-stats` binary the way operators do.

use assert_cmd::Command;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fixtures")
        .join(name)
}

fn pager_stats() -> Command {
    Command::cargo_bin("pager-stats").expect("binary should be built")
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = pager_stats().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Usage: ./pager-stats <pager-duty csv file>\n"
    );
}

#[test]
fn test_two_arguments_prints_usage() {
    let output = pager_stats().args(["a.csv", "b.csv"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Usage: "));
}

#[test]
fn test_double_dash_before_path_prints_usage() {
    let output = pager_stats()
        .args(["--", "a.csv"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Usage: "));
}

#[test]
fn test_missing_file_fails_cleanly() {
    let output = pager_stats()
        .arg(fixture("does_not_exist.csv"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error [E001]"), "stderr was: {stderr}");
    assert!(stderr.contains("does_not_exist.csv"));
}

#[test]
fn test_malformed_row_fails_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.csv");
    std::fs::write(
        &path,
        "r,1,went down,s,u,a,Cloud SaaS Incident Management,t\nr,2,went down\n",
    )
    .unwrap();

    let output = pager_stats().arg(&path).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error [E010]: row 2 has 3 fields"));
}

#[cfg(not(any(
    feature = "render-json",
    feature = "render-table",
    feature = "render-narrative"
)))]
#[test]
fn test_fixture_prints_golden_lines() {
    let expected = std::fs::read_to_string(fixture("pagerduty_export.expected.txt")).unwrap();

    pager_stats()
        .arg(fixture("pagerduty_export.csv"))
        .assert()
        .success()
        .stdout(expected);
}
