//! Input file to report file, through the library and the binary

use scorepulse::config::{OutputConfig, OutputFormat, RunConfig};
use scorepulse::coordinator::Coordinator;
use scorepulse::output::write_report;
use scorepulse::record::loader::load_records;
use std::fs;
use std::process::Command;

const INPUT: &str = "3 2\n1 80 40\n2 60 60\n3 100 100\n";

const EXPECTED_TEXT: &str = "\
1 60.00 Passed
2 60.00 Passed
3 100.00 Passed

--- Overall Statistics ---
Number of students passing each question:
Question 1: 3 students passed.
Question 2: 2 students passed.
Total number of students who passed overall: 3
Highest grade: 100
Lowest grade: 40
";

#[test]
fn library_pipeline_writes_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("results.txt");
    fs::write(&input, INPUT).unwrap();

    let store = load_records(&input).unwrap();
    let report = Coordinator::new(RunConfig::default()).run(store).unwrap();
    write_report(
        &report,
        &OutputConfig {
            path: output.clone(),
            format: OutputFormat::Text,
        },
    )
    .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED_TEXT);
}

#[test]
fn binary_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("results.txt");
    fs::write(&input, INPUT).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_scorepulse"))
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--jitter")
        .arg("1ms")
        .env_remove("SCOREPULSE_CONFIG")
        .env_remove("RUST_LOG")
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED_TEXT);
}

#[test]
fn binary_prints_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, INPUT).unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_scorepulse"))
        .arg(&input)
        .args(["--output", "-", "--format", "json"])
        .env_remove("SCOREPULSE_CONFIG")
        .output()
        .unwrap();

    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["statistics"]["per_item_passed"], serde_json::json!([3, 2]));
    assert_eq!(value["statistics"]["lowest"], 40);
}

#[test]
fn binary_reads_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("results.csv");
    let config = dir.path().join("scorepulse.toml");
    fs::write(&input, "2 1\n1 55\n2 45\n").unwrap();
    fs::write(
        &config,
        format!(
            "[input]\npath = {:?}\n[output]\npath = {:?}\nformat = \"csv\"\n[grading]\npass_threshold = 50\n",
            input.display().to_string(),
            output.display().to_string()
        ),
    )
    .unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_scorepulse"))
        .arg("--config")
        .arg(&config)
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "id,average,result\n1,55.00,Passed\n2,45.00,Failed\n"
    );
}

#[test]
fn binary_fails_on_malformed_input_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("results.txt");
    fs::write(&input, "3 2\n1 80 40\n2 60\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_scorepulse"))
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .env_remove("SCOREPULSE_CONFIG")
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("input ended early"), "stderr: {stderr}");
}

#[test]
fn binary_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("results.txt");
    fs::write(&input, INPUT).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_scorepulse"))
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--dry-run")
        .env_remove("SCOREPULSE_CONFIG")
        .status()
        .unwrap();

    assert!(status.success());
    assert!(!output.exists());
}
