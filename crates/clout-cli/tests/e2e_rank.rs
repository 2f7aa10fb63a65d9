//! E2E CLI tests covering:
//! - `clout rank` file export, stdout export, formats, and normalized columns
//! - `clout entities` listing
//! - Coded errors for unknown entities, malformed records, and bad inputs
//! - Config discovery and the timing report
//!
//! Each test runs the `clout` binary as a subprocess in an isolated temp
//! directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the clout binary, rooted in `dir`.
fn clout_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("clout"));
    cmd.current_dir(dir);
    cmd.env("CLOUT_LOG", "error");
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env_remove("CLOUT_TIMING");
    cmd
}

/// Two entities: `@united` with a reply, a reshare, and a standalone post;
/// `@delta` with a record missing its text.
const CORPUS: &str = r#"{
  "@united": [
    {
      "user": {"screen_name": "ann", "listed_count": 1, "followers_count": 100, "statuses_count": 10},
      "text": "@bo @united where is my bag",
      "in_reply_to_screen_name": "bo",
      "entities": {"user_mentions": [{"screen_name": "bo"}, {"screen_name": "@united"}]}
    },
    {
      "user": {"screen_name": "bo", "listed_count": 4, "followers_count": 400, "statuses_count": 40},
      "text": "RT @cy: delayed again",
      "retweeted_status": {
        "user": {"screen_name": "cy", "listed_count": 9, "followers_count": 900, "statuses_count": 90},
        "text": "delayed again"
      },
      "in_reply_to_screen_name": null,
      "entities": {"user_mentions": [{"screen_name": "cy"}]}
    },
    {
      "user": {"screen_name": "dee", "listed_count": 2, "followers_count": 200, "statuses_count": 20},
      "text": "flying today",
      "entities": {"user_mentions": []}
    }
  ],
  "@delta": [
    {"user": {"screen_name": "eli"}}
  ]
}"#;

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let corpus = dir.path().join("tweets.json");
    fs::write(&corpus, CORPUS).expect("write corpus");
    (dir, corpus)
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("clout should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

fn csv_column(csv: &str, column: usize) -> Vec<String> {
    csv.lines()
        .skip(1)
        .map(|line| line.split(',').nth(column).unwrap_or_default().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// clout rank
// ---------------------------------------------------------------------------

#[test]
fn rank_writes_entity_csv_under_output() {
    let (dir, corpus) = setup();

    clout_cmd(dir.path())
        .args(["rank", "--tweets"])
        .arg(&corpus)
        .args(["--entity", "@united"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 4 rows"));

    let table = fs::read_to_string(dir.path().join("output/@united.csv")).expect("csv written");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines[0],
        "user_name,score,listed_count,followers_count,statuses_count,central"
    );
    assert_eq!(lines.len(), 5);

    let mut users = csv_column(&table, 0);
    users.sort();
    // `@united` is only mentioned, so it has no snapshot and is not ranked.
    assert_eq!(users, vec!["ann", "bo", "cy", "dee"]);
    // Highest counters everywhere; first row.
    assert!(lines[1].starts_with("cy,"));
    assert!(lines[1].contains(",9,900,90,"));
}

#[test]
fn rank_respects_output_dir() {
    let (dir, corpus) = setup();

    clout_cmd(dir.path())
        .args(["rank", "--tweets"])
        .arg(&corpus)
        .args(["--entity", "@united", "--output-dir", "ranked/airlines"])
        .assert()
        .success();

    assert!(dir.path().join("ranked/airlines/@united.csv").is_file());
    assert!(!dir.path().join("output").exists());
}

#[test]
fn rank_stdout_json_is_sorted_by_score() {
    let (dir, corpus) = setup();

    let out = stdout_of(
        clout_cmd(dir.path())
            .args(["rank", "--tweets"])
            .arg(&corpus)
            .args(["--entity", "@united", "--stdout", "--format", "json"]),
    );
    let rows: Value = serde_json::from_str(&out).expect("json output");
    let rows = rows.as_array().expect("array");

    assert_eq!(rows.len(), 4);
    let scores: Vec<f64> = rows
        .iter()
        .map(|r| r["score"].as_f64().expect("score"))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn rank_normalized_columns_are_centered() {
    let (dir, corpus) = setup();

    let out = stdout_of(
        clout_cmd(dir.path())
            .args(["rank", "--tweets"])
            .arg(&corpus)
            .args(["--entity", "@united", "--stdout", "--normalized"]),
    );

    for column in 2..=5 {
        let sum: f64 = csv_column(&out, column)
            .iter()
            .map(|v| v.parse::<f64>().expect("numeric"))
            .sum();
        assert!(sum.abs() < 1e-9, "column {column} sums to {sum}");
    }
}

#[test]
fn rank_pretty_prints_table() {
    let (dir, corpus) = setup();

    clout_cmd(dir.path())
        .args(["rank", "--tweets"])
        .arg(&corpus)
        .args(["--entity", "@united", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user_name"))
        .stdout(predicate::str::contains("cy"));
}

#[test]
fn rank_limit_flag_truncates() {
    let (dir, corpus) = setup();

    let out = stdout_of(
        clout_cmd(dir.path())
            .args(["rank", "--tweets"])
            .arg(&corpus)
            .args(["--entity", "@united", "--stdout", "--limit", "2"]),
    );
    assert_eq!(out.lines().count(), 3);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_entity_fails_with_code() {
    let (dir, corpus) = setup();

    clout_cmd(dir.path())
        .args(["rank", "--tweets"])
        .arg(&corpus)
        .args(["--entity", "@nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2003]"))
        .stderr(predicate::str::contains("clout entities"));
}

#[test]
fn malformed_record_fails_with_index_and_field() {
    let (dir, corpus) = setup();

    clout_cmd(dir.path())
        .args(["rank", "--tweets"])
        .arg(&corpus)
        .args(["--entity", "@delta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2004]"))
        .stderr(predicate::str::contains("record 0"))
        .stderr(predicate::str::contains("`text`"));

    assert!(!dir.path().join("output/@delta.csv").exists());
}

#[test]
fn missing_corpus_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");

    clout_cmd(dir.path())
        .args(["rank", "--tweets", "absent.json", "--entity", "@united"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2001]"));
}

#[test]
fn invalid_corpus_json_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("tweets.json"), "[1, 2, 3]").expect("write");

    clout_cmd(dir.path())
        .args(["entities", "--tweets", "tweets.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E2002]"));
}

// ---------------------------------------------------------------------------
// clout entities
// ---------------------------------------------------------------------------

#[test]
fn entities_lists_sorted_handles_with_counts() {
    let (dir, corpus) = setup();

    let out = stdout_of(clout_cmd(dir.path()).args(["entities", "--tweets"]).arg(&corpus));
    assert_eq!(out, "@delta\t1\n@united\t3\n");
}

#[test]
fn entities_json() {
    let (dir, corpus) = setup();

    let out = stdout_of(
        clout_cmd(dir.path())
            .args(["entities", "--json", "--tweets"])
            .arg(&corpus),
    );
    let value: Value = serde_json::from_str(&out).expect("json");
    assert_eq!(value[1]["entity"], "@united");
    assert_eq!(value[1]["records"], 3);
}

// ---------------------------------------------------------------------------
// Config and timing
// ---------------------------------------------------------------------------

#[test]
fn project_config_sets_limit() {
    let (dir, corpus) = setup();
    fs::write(dir.path().join("clout.toml"), "[rank]\nlimit = 1\n").expect("write config");

    let out = stdout_of(
        clout_cmd(dir.path())
            .args(["rank", "--tweets"])
            .arg(&corpus)
            .args(["--entity", "@united", "--stdout"]),
    );
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn invalid_config_fails_with_code() {
    let (dir, corpus) = setup();
    fs::write(dir.path().join("bad.toml"), "[rank]\nlimit = \"many\"\n").expect("write config");

    clout_cmd(dir.path())
        .args(["--config", "bad.toml", "rank", "--tweets"])
        .arg(&corpus)
        .args(["--entity", "@united"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]"));
}

#[test]
fn missing_explicit_config_fails() {
    let (dir, corpus) = setup();

    clout_cmd(dir.path())
        .args(["--config", "nope.toml", "entities", "--tweets"])
        .arg(&corpus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn timing_flag_prints_stage_report() {
    let (dir, corpus) = setup();

    clout_cmd(dir.path())
        .args(["--timing", "rank", "--stdout", "--tweets"])
        .arg(&corpus)
        .args(["--entity", "@united"])
        .assert()
        .success()
        .stderr(predicate::str::contains("timing report"))
        .stderr(predicate::str::contains("centrality.betweenness"));
}
