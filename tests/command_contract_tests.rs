use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const SHA: &str = "46baf6c6be29af9c040bc14195e195848598bbae";
const COMMIT_DATE: &str = "2021-09-21T18:06:25-07:00";
const JOB_STARTED: &str = "2021-09-21T21:06:25-07:00";

fn get_binary() -> String {
    env!("CARGO_BIN_EXE_test-monitor").to_string()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Run the binary from `cwd` with no run metadata in the environment.
fn run_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(get_binary())
        .args(args)
        .current_dir(cwd)
        .env_remove("COMMIT_SHA")
        .env_remove("COMMIT_DATE")
        .env_remove("JOB_STARTED")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute test-monitor")
}

fn metadata_args() -> [&'static str; 6] {
    [
        "--commit-sha",
        SHA,
        "--commit-date",
        COMMIT_DATE,
        "--job-started",
        JOB_STARTED,
    ]
}

#[test]
fn test_missing_metadata_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");
    let input = fixture("pass-crypto-hash.json");

    let output = run_in(
        dir.path(),
        &[
            "process",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--no-progress",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("COMMIT_SHA"));
}

#[test]
fn test_protocol_violation_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");
    let input = dir.path().join("bad.json");
    std::fs::write(&input, "{\"Action\":\"start\",\"Package\":\"p\"}\n").unwrap();

    let mut args = vec![
        "process",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--no-progress",
    ];
    args.extend(metadata_args());
    let output = run_in(dir.path(), &args);

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("protocol violation on line 1"));
    assert_eq!(stderr.matches("unexpected action `start`").count(), 1);
}

#[test]
fn test_stdout_compact_emits_report_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("rerun-parallel-fail.json");

    let mut args = vec![
        "process",
        input.to_str().unwrap(),
        "--stdout",
        "--compact",
        "--no-progress",
    ];
    args.extend(metadata_args());
    let output = run_in(dir.path(), &args);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end().lines().count(), 1);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(json["commit_sha"], SHA);
    assert_eq!(json["commit_date"], COMMIT_DATE);
    assert_eq!(json["job_run_date"], JOB_STARTED);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["package"], "github.com/onflow/flow-go/engine");
    assert_eq!(results[0]["result"], "fail");
    assert_eq!(results[0]["tests"].as_array().unwrap().len(), 3);

    // nothing written next to the caller
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_implicit_process_matches_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("pass-crypto-hash.json");

    let mut implicit = vec![input.to_str().unwrap(), "--stdout", "--compact", "--no-progress"];
    implicit.extend(metadata_args());
    let mut explicit = vec!["process"];
    explicit.extend(implicit.iter().copied());

    let implicit = run_in(dir.path(), &implicit);
    let explicit = run_in(dir.path(), &explicit);

    assert_eq!(implicit.status.code(), Some(0));
    assert_eq!(explicit.status.code(), Some(0));
    assert!(!implicit.stdout.is_empty());
    assert_eq!(implicit.stdout, explicit.stdout);
}

#[test]
fn test_file_report_is_written_to_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");
    let input = fixture("noisy-stream.json");

    let mut args = vec![
        "process",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--file-prefix",
        "nightly",
        "--no-progress",
    ];
    args.extend(metadata_args());
    let output = run_in(dir.path(), &args);

    assert_eq!(output.status.code(), Some(0));
    let entries: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("nightly-"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&entries[0]).unwrap()).unwrap();
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
}
