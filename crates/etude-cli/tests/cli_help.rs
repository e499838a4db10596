use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("etude")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_help_shows_launch_flags() {
    cargo_bin_cmd!("etude")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--mode"))
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--pattern"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("etude")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("etude")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_unknown_mode_is_rejected() {
    cargo_bin_cmd!("etude")
        .args(["--mode", "sprint"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown mode 'sprint'"));
}

#[test]
fn test_unknown_language_is_rejected() {
    cargo_bin_cmd!("etude")
        .args(["--language", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown language 'cobol'"));
}
