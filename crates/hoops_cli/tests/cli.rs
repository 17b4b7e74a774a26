use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn hoops(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hoops"))
        .args(args)
        .env_remove("HOOPS_CONFIG_PATH")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run hoops")
}

fn generate(out: &Path, extra: &[&str]) -> Output {
    let out = out.to_str().unwrap();
    let mut args = vec![
        "generate",
        "--games-per-difficulty",
        "2",
        "--difficulty",
        "basic,hard",
        "--seed",
        "17",
        "--out",
        out,
    ];
    args.extend_from_slice(extra);
    hoops(&args)
}

fn jsonl_lines(dir: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(dir.join("examples.jsonl"))
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn generate_writes_jsonl_and_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let output = generate(dir.path(), &["--verify", "--json-files"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let lines = jsonl_lines(dir.path());
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0]["type"], "example");
    assert_eq!(lines[1]["type"], "true_report");
    assert_eq!(lines[0]["game_id"], "basic_game_1");
    assert_eq!(lines[6]["game_id"], "hard_game_2");
    assert!(dir.path().join("examples.json").exists());
    assert!(dir.path().join("true_report.json").exists());
}

#[test]
fn generate_is_reproducible() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    assert!(generate(a.path(), &[]).status.success());
    assert!(generate(b.path(), &[]).status.success());
    assert_eq!(
        fs::read(a.path().join("examples.jsonl")).unwrap(),
        fs::read(b.path().join("examples.jsonl")).unwrap()
    );
}

#[test]
fn config_override_is_applied_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("overrides.json");
    fs::write(
        &config,
        r#"{ "rules": { "foul_limit": 6 }, "roster": null, "profiles": {} }"#,
    )
    .unwrap();
    let out = dir.path().join("out");
    let output = generate(&out, &["--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{ "rules": { "foul_limit": 0 } }"#).unwrap();
    let output = generate(&out, &["--config", bad.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("foul_limit"));
}

#[test]
fn evaluate_scores_truth_as_perfect() {
    let dir = tempfile::tempdir().unwrap();
    assert!(generate(dir.path(), &[]).status.success());

    let truth = jsonl_lines(dir.path())
        .into_iter()
        .find(|l| l["type"] == "true_report" && l["game_id"] == "hard_game_1")
        .unwrap();
    let candidate = dir.path().join("candidate.json");
    fs::write(&candidate, truth["data"].to_string()).unwrap();

    let jsonl = dir.path().join("examples.jsonl");
    let output = hoops(&[
        "evaluate",
        "--truth",
        jsonl.to_str().unwrap(),
        "--candidate",
        candidate.to_str().unwrap(),
        "--game-id",
        "hard_game_1",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["field"]["accuracy_pct"], 100.0);
    assert!(summary["discrepancies"].as_array().unwrap().is_empty());
    assert!(summary.get("checks").is_none());
}

#[test]
fn evaluate_unknown_game_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(generate(dir.path(), &[]).status.success());
    let candidate = dir.path().join("candidate.json");
    fs::write(&candidate, "{}").unwrap();
    let jsonl = dir.path().join("examples.jsonl");
    let output = hoops(&[
        "evaluate",
        "--truth",
        jsonl.to_str().unwrap(),
        "--candidate",
        candidate.to_str().unwrap(),
        "--game-id",
        "medium_game_9",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("medium_game_9"));
}
