use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn generate_writes_full_history_and_summary() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("history.txt");

    let mut cmd = Command::cargo_bin("histgen").unwrap();
    cmd.arg("generate").arg("--output").arg(&out).args(["--seed", "42"]);
    let stdout = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(stdout).unwrap();

    assert!(stdout.starts_with("Generated 10000 commits with "));
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("COMMIT|")).count(), 10_000);
}

#[test]
fn generate_json_reports_seed() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("history.txt");

    let mut cmd = Command::cargo_bin("histgen").unwrap();
    cmd.arg("generate").arg("-o").arg(&out).args(["--seed", "7", "--json"]);
    let stdout = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&stdout).unwrap();

    assert_eq!(v["seed"].as_u64(), Some(7));
    assert_eq!(v["commits"].as_u64(), Some(10_000));
    assert!(v["unique_files"].as_u64().unwrap() >= 310);
}

#[test]
fn seeded_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    for path in [&a, &b] {
        Command::cargo_bin("histgen")
            .unwrap()
            .arg("generate")
            .arg("--output")
            .arg(path)
            .args(["--seed", "1234", "--json"])
            .assert()
            .success();
    }

    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn check_accepts_generated_history() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("history.txt");

    Command::cargo_bin("histgen")
        .unwrap()
        .arg("generate")
        .arg("--output")
        .arg(&out)
        .arg("--json")
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("histgen").unwrap();
    cmd.arg("check").arg(&out).args(["--expect-commits", "10000", "--json"]);
    let stdout = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&stdout).unwrap();

    assert_eq!(v["commits"].as_u64(), Some(10_000));
    assert_eq!(v["violations"].as_array().map(|a| a.len()), Some(0));
}

#[test]
fn check_fails_on_broken_history() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.txt");
    fs::write(
        &path,
        "COMMIT|aa|Alice|alice@company.com|2022-01-02T00:00:00|Commit 0: Fix bug 0000\n\
         5\t5\tpublic/assets/images/File_00000000.png\n\
         COMMIT|bb|Bob|bob@company.com|2022-01-01T00:00:00|Commit 1: Fix bug 0001\n",
    )
    .unwrap();

    Command::cargo_bin("histgen")
        .unwrap()
        .arg("check")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn check_fails_on_missing_file() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("histgen")
        .unwrap()
        .arg("check")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure();
}
