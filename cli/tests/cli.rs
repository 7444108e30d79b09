use assert_cmd::Command;
use predicates::prelude::*;

fn scratch_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("tracker-cli-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn roll_is_deterministic_for_a_seed() {
    let run = || {
        Command::cargo_bin("cli")
            .unwrap()
            .args(["roll", "--seed", "7", "--count", "3"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn demo_prints_turn_banners_and_actions() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["demo", "--seed", "2025", "--turns", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("===== TURN 1 ====="))
        .stdout(predicate::str::contains("----- ACTING: Goblin -----"))
        .stdout(predicate::str::contains("Goblin used"));
}

#[test]
fn reset_then_show_reports_an_empty_battle() {
    let dir = scratch_dir("reset");
    let dir_arg = dir.to_string_lossy().into_owned();

    Command::cargo_bin("cli")
        .unwrap()
        .args(["reset", "--data-dir", &dir_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("battle reset"));

    Command::cargo_bin("cli")
        .unwrap()
        .args(["show", "--data-dir", &dir_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("turn: 0"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn show_emits_json_when_asked() {
    let dir = scratch_dir("json");
    let dir_arg = dir.to_string_lossy().into_owned();

    Command::cargo_bin("cli")
        .unwrap()
        .args(["reset", "--data-dir", &dir_arg])
        .assert()
        .success();

    Command::cargo_bin("cli")
        .unwrap()
        .args(["show", "--data-dir", &dir_arg, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currentTurn\": 0"));

    let _ = std::fs::remove_dir_all(&dir);
}
