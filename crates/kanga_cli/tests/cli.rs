use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn kanga(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kanga").unwrap();
    cmd.arg("--db")
        .arg(home.join("kanga.db"))
        .arg("--log-dir")
        .arg(home.join("logs"));
    cmd
}

#[test]
fn no_arguments_prints_top_level_help() {
    let home = TempDir::new().unwrap();

    kanga(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dump-csv"))
        .stdout(predicate::str::contains("misty"));

    assert!(!home.path().join("kanga.db").exists());
}

#[test]
fn help_for_a_verb_and_unknown_topic() {
    let home = TempDir::new().unwrap();

    kanga(home.path())
        .args(["help", "egg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HX"));

    kanga(home.path())
        .args(["help", "nonsense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("read-csv"));
}

#[test]
fn logged_flips_show_up_in_statistics() {
    let home = TempDir::new().unwrap();

    kanga(home.path())
        .arg("HH")
        .assert()
        .success()
        .stdout(predicate::str::contains("flip logged..."));

    kanga(home.path())
        .arg("tt")
        .assert()
        .success()
        .stdout(predicate::str::contains("flip logged... RIP"));

    kanga(home.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("STATISTICS"))
        .stdout(predicate::str::contains("| Total flips              |      2   |"))
        .stdout(predicate::str::contains("50.00%"));
}

#[test]
fn undo_removes_the_latest_flip() {
    let home = TempDir::new().unwrap();

    kanga(home.path()).arg("HH").assert().success();
    kanga(home.path()).arg("TT").assert().success();
    kanga(home.path())
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last flip undone"));

    kanga(home.path())
        .arg("heads")
        .assert()
        .success()
        .stdout(predicate::str::contains("HEADS INFO"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn egg_entries_feed_the_egg_report() {
    let home = TempDir::new().unwrap();

    for outcome in ["H", "HX", "T"] {
        kanga(home.path())
            .args(["egg", outcome])
            .assert()
            .success()
            .stdout(predicate::str::contains("Exeggutor entry logged..."));
    }

    kanga(home.path())
        .args(["egg", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXEGGUTOR STATS"))
        .stdout(predicate::str::contains("Heads that mattered"))
        .stdout(predicate::str::contains("Average damage"));
}

#[test]
fn invalid_egg_argument_is_rejected_before_touching_the_store() {
    let home = TempDir::new().unwrap();

    kanga(home.path())
        .args(["egg", "HTX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument for egg command"));

    assert!(!home.path().join("kanga.db").exists());
}

#[test]
fn misty_verdict_tracks_entries() {
    let home = TempDir::new().unwrap();

    kanga(home.path())
        .args(["misty", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clean"));

    kanga(home.path())
        .args(["misty", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry logged..."));

    kanga(home.path())
        .args(["misty", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("infinite"));
}

#[test]
fn reset_clears_every_kind() {
    let home = TempDir::new().unwrap();

    kanga(home.path()).arg("HT").assert().success();
    kanga(home.path()).args(["misty", "3"]).assert().success();
    kanga(home.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data reset"));

    kanga(home.path())
        .args(["misty", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn csv_dump_and_read_round_trip() {
    let home = TempDir::new().unwrap();
    let backup = home.path().join("backup");

    kanga(home.path()).arg("HH").assert().success();
    kanga(home.path()).args(["egg", "TX"]).assert().success();

    kanga(home.path())
        .arg("dump-csv")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data dumped to"));

    for name in ["kanga.csv", "exeggutor.csv", "misty.csv"] {
        assert!(backup.join(name).exists(), "{name} missing");
    }
    let flips = fs::read_to_string(backup.join("kanga.csv")).unwrap();
    assert!(flips.starts_with("1,1,"));

    kanga(home.path()).arg("reset").assert().success();
    kanga(home.path())
        .arg("read-csv")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data read from"));

    kanga(home.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Total flips              |      1   |"));
}

#[test]
fn malformed_csv_reports_failure_and_keeps_data() {
    let home = TempDir::new().unwrap();
    let backup = home.path().join("backup");
    fs::create_dir_all(&backup).unwrap();
    fs::write(backup.join("kanga.csv"), "1,1\n").unwrap();

    kanga(home.path())
        .arg("read-csv")
        .arg(&backup)
        .arg("--kanga")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to read CSV"));

    kanga(home.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Total flips              |      0   |"));
}
