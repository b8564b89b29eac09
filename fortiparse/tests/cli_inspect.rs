use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_prints_tree() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fortiparse"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/nat.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "config firewall central-snat-map (line 1, 0 directives)",
        ))
        .stdout(predicate::str::contains("  edit WEB_HTTPS (line 23, 7 directives)"));
}

#[test]
fn inspect_depth_zero_hides_edits() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fortiparse"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/policy.conf"))
        .arg("--depth")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("config firewall policy"))
        .stdout(predicate::str::contains("edit").not());
}

#[test]
fn inspect_reads_stdin() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fortiparse"));
    cmd.arg("inspect")
        .arg("-")
        .write_stdin("config firewall vip\n    edit \"web\"\n    next\nend\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  edit web (line 2, 0 directives)"));
}

#[test]
fn inspect_reports_malformed_line() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fortiparse"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/malformed.conf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed block at line 3"));
}
