use std::path::PathBuf;

use fortiparse_core::{extract, tokenize_file, BlockKind, DirectiveValue, Malformed, ParseError};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_policy_dump_sections_and_edits() {
    let blocks = tokenize_file(&fixture("fixtures/policy.conf")).expect("parse should succeed");
    assert_eq!(blocks.len(), 1);

    let section = &blocks[0];
    assert_eq!(section.kind, BlockKind::Config);
    assert_eq!(section.label, "firewall policy");
    let ids: Vec<_> = section.edits().map(|e| e.label.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);

    let first = extract(section.edits().next().expect("first edit"));
    assert_eq!(
        first.get("service"),
        Some(&DirectiveValue::List(vec![
            "HTTP".to_string(),
            "HTTPS".to_string(),
            "DNS".to_string()
        ]))
    );
    assert_eq!(
        first.get("comments").and_then(|v| v.as_scalar()),
        Some("Outbound web access")
    );
}

#[test]
fn parses_mixed_nat_dump() {
    let blocks = tokenize_file(&fixture("fixtures/nat.conf")).expect("parse should succeed");
    let labels: Vec<_> = blocks.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["firewall central-snat-map", "firewall vip"]);
    assert_eq!(blocks[1].edits().count(), 3);
}

#[test]
fn malformed_fixture_reports_opening_quote_line() {
    let err = tokenize_file(&fixture("fixtures/malformed.conf")).expect_err("should fail");
    match err {
        ParseError::MalformedBlock { line, reason } => {
            assert_eq!(line, 3);
            assert_eq!(reason, Malformed::UnterminatedQuote);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = tokenize_file(&fixture("fixtures/does-not-exist.conf")).expect_err("should fail");
    assert!(matches!(err, ParseError::Io(_)));
    assert_eq!(err.line(), None);
}

#[test]
fn reads_crlf_dump_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vip.conf");
    std::fs::write(
        &path,
        "config firewall vip\r\n    edit \"web\"\r\n        set extip 203.0.113.5\r\n    next\r\nend\r\n",
    )
    .expect("write dump");

    let blocks = tokenize_file(&path).expect("parse should succeed");
    let web = blocks[0].edits().next().expect("edit");
    assert_eq!(web.label, "web");
    assert_eq!(
        extract(web).get("extip"),
        Some(&DirectiveValue::Scalar("203.0.113.5".to_string()))
    );
}
