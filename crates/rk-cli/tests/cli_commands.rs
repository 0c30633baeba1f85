//! CLI integration tests.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run `rk` from an empty directory so no stray rk.toml is picked up.
fn rk(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rk").unwrap();
    cmd.current_dir(dir.path());
    cmd.env_remove("RK_SEED")
        .env_remove("RK_DEFAULT_TN")
        .env_remove("RK_TEN_DICE__LITTLE_TRUTHS");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn normalize_prints_table_and_formula() {
    let dir = TempDir::new().unwrap();
    rk(&dir)
        .args(["normalize", "14", "8"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Normalized")
                .and(predicate::str::contains("10d10k10x10+2")),
        );
}

#[test]
fn normalize_json() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["normalize", "9", "12", "--json"]));
    assert_eq!(json["roll"], 9);
    assert_eq!(json["keep"], 10);
    assert_eq!(json["bonus"], 0);
}

#[test]
fn normalize_with_little_truths_flag() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["normalize", "6", "3", "--json", "--little-truths"]));
    assert_eq!(json["bonus"], 2);
}

#[test]
fn normalize_negative_bonus() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["normalize", "6", "3", "--bonus", "-2", "--json"]));
    assert_eq!(json["bonus"], -2);
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_zero_dice_is_deterministic() {
    let dir = TempDir::new().unwrap();
    rk(&dir)
        .args(["roll", "0k0+5", "--tn", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Total")
                .and(predicate::str::contains("5"))
                .and(predicate::str::contains("Success")),
        );
}

#[test]
fn roll_raise_fails_flat_total() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["roll", "0k0+5", "--tn", "5", "-r", "1", "--json"]));
    assert_eq!(json["target"]["effective_tn"], 10);
    assert_eq!(json["target"]["outcome"], "failure");
}

#[test]
fn roll_without_tn_has_no_verdict() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["roll", "6k3", "--seed", "42", "--json"]));
    assert!(json["target"]["outcome"].is_null());
    assert_eq!(json["expression"]["count"], 6);
    assert_eq!(json["roll"]["dice"].as_array().unwrap().len(), 6);
}

#[test]
fn roll_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let first = json_output(rk(&dir).args(["roll", "8k4", "--seed", "7", "--json"]));
    let second = json_output(rk(&dir).args(["roll", "8k4", "--seed", "7", "--json"]));
    assert_eq!(first, second);
}

#[test]
fn roll_normalizes_oversized_pool() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["roll", "14k8", "--seed", "1", "--json"]));
    assert_eq!(json["pool"]["roll"], 10);
    assert_eq!(json["pool"]["keep"], 10);
    assert_eq!(json["pool"]["bonus"], 2);
}

#[test]
fn roll_negative_bonus_is_rolled_as_written() {
    let dir = TempDir::new().unwrap();
    rk(&dir)
        .args(["roll", "12k3-2", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("as written"));
}

#[test]
fn roll_unskilled_never_explodes() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["roll", "10k10u", "--seed", "5", "--json"]));
    assert!(json["expression"]["explode_threshold"].is_null());
    for die in json["roll"]["dice"].as_array().unwrap() {
        assert_eq!(die["faces"].as_array().unwrap().len(), 1);
    }
}

#[test]
fn roll_rejects_malformed_notation() {
    let dir = TempDir::new().unwrap();
    rk(&dir)
        .args(["roll", "6d3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid roll notation"));
}

#[test]
fn roll_lenient_accepts_malformed_notation() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["roll", "6k", "--lenient", "--seed", "2", "--json"]));
    assert_eq!(json["pool"]["roll"], 6);
    assert_eq!(json["pool"]["keep"], 0);
    assert_eq!(json["roll"]["total"], 0);
}

// ---------------------------------------------------------------------------
// skill / trait / ring / damage
// ---------------------------------------------------------------------------

#[test]
fn skill_check_builds_pool() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args([
        "skill", "--trait", "3", "--skill", "2", "--tn", "15", "--seed", "9", "--json",
    ]));
    assert_eq!(json["expression"]["count"], 5);
    assert_eq!(json["expression"]["keep_highest"], 3);
    assert_eq!(json["target"]["effective_tn"], 15);
}

#[test]
fn unskilled_skill_check() {
    let dir = TempDir::new().unwrap();
    rk(&dir)
        .args(["skill", "--trait", "2", "--seed", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unskilled").and(predicate::str::contains("2d10k2")));
}

#[test]
fn emphasis_rerolls_ones() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args([
        "skill", "--trait", "3", "--skill", "3", "-e", "--seed", "4", "--json",
    ]));
    assert_eq!(json["expression"]["reroll_threshold"], 1);
}

#[test]
fn wounds_raise_tn() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args([
        "trait", "--trait", "2", "--tn", "10", "-w", "5", "--seed", "4", "--json",
    ]));
    assert_eq!(json["target"]["effective_tn"], 15);
}

#[test]
fn trait_with_void() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args(["trait", "--trait", "3", "--void", "--seed", "4", "--json"]));
    assert_eq!(json["pool"]["roll"], 4);
    assert_eq!(json["pool"]["keep"], 4);
}

#[test]
fn ring_roll() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args([
        "ring", "--ring", "3", "--school-rank", "2", "--seed", "4", "--json",
    ]));
    assert_eq!(json["pool"]["roll"], 5);
    assert_eq!(json["pool"]["keep"], 3);
}

#[test]
fn damage_roll() {
    let dir = TempDir::new().unwrap();
    let json = json_output(rk(&dir).args([
        "damage", "--strength", "3", "--weapon", "3k2", "--seed", "4", "--json",
    ]));
    assert_eq!(json["pool"]["roll"], 6);
    assert_eq!(json["pool"]["keep"], 2);
    assert!(json["target"]["outcome"].is_null());
}

#[test]
fn damage_rejects_bad_weapon() {
    let dir = TempDir::new().unwrap();
    rk(&dir)
        .args(["damage", "--strength", "3", "--weapon", "katana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad weapon rating"));
}

// ---------------------------------------------------------------------------
// settings
// ---------------------------------------------------------------------------

#[test]
fn config_file_enables_little_truths() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rk.toml"), "[ten_dice]\nlittle_truths = true\n").unwrap();
    let json = json_output(rk(&dir).args(["normalize", "6", "3", "--json"]));
    assert_eq!(json["bonus"], 2);
}

#[test]
fn config_default_tn_applies() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("table.toml");
    fs::write(&path, "default_tn = 5\n").unwrap();
    let json = json_output(rk(&dir).args([
        "roll",
        "0k0+5",
        "--json",
        "--config",
        path.to_str().unwrap(),
    ]));
    assert_eq!(json["target"]["outcome"], "success");
}

#[test]
fn env_overrides_config() {
    let dir = TempDir::new().unwrap();
    let json = json_output(
        rk(&dir)
            .env("RK_TEN_DICE__LITTLE_TRUTHS", "true")
            .args(["normalize", "6", "3", "--json"]),
    );
    assert_eq!(json["bonus"], 2);
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    rk(&dir)
        .args(["normalize", "6", "3", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
