use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn save_policies_acknowledges_count() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fortiparse"));
    cmd.arg("save")
        .arg("-")
        .arg("--kind")
        .arg("policies")
        .write_stdin(r#"{"policies": [{"id": "1", "action": "accept"}, {"id": "2"}]}"#)
        .assert()
        .success()
        .stdout("{\"ok\":true,\"count\":2}\n");
}

#[test]
fn save_nat_acknowledges_each_collection() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fortiparse"));
    cmd.arg("save")
        .arg("-")
        .arg("--kind")
        .arg("nat")
        .write_stdin(
            r#"{"mode": "udt",
                "csnat": [{"id": 1, "orig_addr": "LAN1", "nat_ippool": "Pool"}],
                "vip": [],
                "udt": [{"public": "203.0.113.9"}]}"#,
        )
        .assert()
        .success()
        .stdout("{\"ok\":true,\"csnat\":1,\"vip\":0,\"udt\":1,\"mode\":\"udt\"}\n");
}

#[test]
fn save_rejects_invalid_payload() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fortiparse"));
    cmd.arg("save")
        .arg("-")
        .arg("--kind")
        .arg("nat")
        .write_stdin(r#"{"mode": "dynamic"}"#)
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("{\"ok\":false,\"error\":"))
        .stderr(predicate::str::contains("$.mode"));
}
