//! Parse-and-run tests for every subcommand, capturing stdout into a buffer.

use clap::Parser;
use proptest::prelude::*;
use sortviz_cli::{Cli, CliError, run_with};

fn run_args(args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec!["sortviz"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    let mut out = Vec::new();
    run_with(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

fn fast_config(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("fast.toml");
    std::fs::write(&path, "[interval]\nbase_ms = 2\nstep_ms = 0\nfloor_ms = 1\n").unwrap();
    path.display().to_string()
}

#[test]
fn generate_feeds_trace() {
    let array = run_args(&["generate", "--kind", "nearly-sorted", "--size", "10", "--seed", "3"]).unwrap();
    let text = run_args(&["trace", "-a", "merge", "--input", array.trim()]).unwrap();
    assert!(text.lines().last().unwrap().starts_with("merge: "));
}

#[test]
fn trace_defaults_to_the_example_array() {
    let text = run_args(&["--json", "trace", "-a", "heap"]).unwrap();
    let summary: serde_json::Value = serde_json::from_str(text.lines().last().unwrap()).unwrap();
    assert_eq!(summary["input"], serde_json::json!([64, 34, 25, 12, 22, 11, 90]));
    assert_eq!(summary["sorted"], serde_json::json!([11, 12, 22, 25, 34, 64, 90]));
}

#[test]
fn trace_of_generated_kind_is_reproducible() {
    let args = ["trace", "-a", "quick", "--kind", "random", "--size", "9", "--seed", "11"];
    assert_eq!(run_args(&args).unwrap(), run_args(&args).unwrap());
}

#[test]
fn play_runs_in_real_time_with_a_fast_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(&dir);
    let text = run_args(&["play", "-a", "insertion", "--input", "2,1", "--config", &config]).unwrap();
    assert!(text.lines().last().unwrap().starts_with("played "));
}

#[test]
fn real_time_race_prints_progress_then_result() {
    let dir = tempfile::tempdir().unwrap();
    let config = fast_config(&dir);
    let text = run_args(&[
        "race", "--left", "bubble", "--right", "selection", "--input", "3,2,1", "--config", &config,
    ])
    .unwrap();
    assert!(text.lines().next().unwrap().starts_with("left 1/"));
    let last = text.lines().last().unwrap();
    assert!(last.starts_with("winner: ") || last == "tie", "{last}");
}

#[test]
fn race_json_reports_both_lanes() {
    let text = run_args(&[
        "race", "--left", "merge", "--right", "bubble", "--kind", "reversed", "--size", "8",
        "--seed", "1", "--instant", "--json",
    ])
    .unwrap();
    let report: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["left"]["algorithm"], "merge");
    assert_eq!(report["right"]["algorithm"], "bubble");
    assert_eq!(report["input"].as_array().unwrap().len(), 8);
}

#[test]
fn missing_config_file_is_a_config_error() {
    let err = run_args(&["play", "-a", "bubble", "--config", "/nonexistent/sortviz.toml"]).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn unknown_algorithm_fails_to_parse() {
    assert!(Cli::try_parse_from(["sortviz", "trace", "-a", "bogo"]).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn trace_lines_match_step_count(values in prop::collection::vec(0i64..1000, 1..15)) {
        let input = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        let text = run_args(&["--json", "trace", "-a", "radix", "--input", &input]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        let summary: serde_json::Value = serde_json::from_str(lines[lines.len() - 1]).unwrap();
        prop_assert_eq!(summary["steps"].as_u64().unwrap() as usize, lines.len() - 1);
        prop_assert_eq!(summary["comparisons"].as_u64(), Some(0));
    }
}
