//! Decoding of JSON request payloads into typed records.
//!
//! Payload rows are converted into the same [`DirectiveMap`] the text parser
//! produces and run through the same builders, so eligibility rules and
//! warnings are identical for both sources. Field values may be strings,
//! lists of strings, numbers, booleans or null (treated as absent). Anything
//! else is [`PayloadError::InvalidPayloadShape`].

use fortiparse_core::{DirectiveMap, DirectiveValue};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::central_snat::CentralSnatRule;
use crate::policy::PolicyRule;
use crate::record::{collect_records_with, Collected, DuplicateIds, Stanza};
use crate::vip::VipRule;
use crate::warning::ParseWarning;

/// Errors that reject a whole payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid payload shape at {path}: expected {expected}")]
    InvalidPayloadShape { path: String, expected: &'static str },
}

/// Which NAT table the client was editing when it saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NatMode {
    Central,
    Udt,
}

/// `{ mode?, csnat: [...], vip: [...], udt?: [...] }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NatPayload {
    pub mode: Option<NatMode>,
    pub csnat: Vec<CentralSnatRule>,
    pub vip: Vec<VipRule>,
    /// Raw UDT rows, kept as sent.
    pub udt: Vec<Value>,
    pub warnings: Vec<ParseWarning>,
}

/// `{ policies: [...] }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyPayload {
    /// Number of rows sent, valid or not.
    pub received: usize,
    pub policies: Vec<PolicyRule>,
    pub warnings: Vec<ParseWarning>,
}

/// Decode an export or save-nat payload.
pub fn decode_nat_payload(bytes: &[u8]) -> Result<NatPayload, PayloadError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let root = as_object(&value, "$")?;

    let mode = match root.get("mode") {
        None | Some(Value::Null) => None,
        Some(Value::String(mode)) => match mode.trim().to_ascii_lowercase().as_str() {
            "central" => Some(NatMode::Central),
            "udt" => Some(NatMode::Udt),
            _ => return Err(shape("$.mode", "\"central\" or \"udt\"")),
        },
        Some(_) => return Err(shape("$.mode", "\"central\" or \"udt\"")),
    };

    let csnat: Collected<CentralSnatRule> =
        collect_records_with(stanzas(root, "csnat", &["id"])?, DuplicateIds::Keep);
    let vip: Collected<VipRule> =
        collect_records_with(stanzas(root, "vip", &["name", "id"])?, DuplicateIds::Keep);
    let udt = list_of_objects(root, "udt")?
        .into_iter()
        .map(|row| Value::Object(row.clone()))
        .collect();

    let mut warnings = csnat.warnings;
    warnings.extend(vip.warnings);

    Ok(NatPayload {
        mode,
        csnat: csnat.records,
        vip: vip.records,
        udt,
        warnings,
    })
}

/// Decode a save-policies payload.
pub fn decode_policy_payload(bytes: &[u8]) -> Result<PolicyPayload, PayloadError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let root = as_object(&value, "$")?;
    let rows = stanzas(root, "policies", &["id"])?;
    let received = rows.len();
    let collected: Collected<PolicyRule> = collect_records_with(rows, DuplicateIds::Keep);

    Ok(PolicyPayload {
        received,
        policies: collected.records,
        warnings: collected.warnings,
    })
}

fn stanzas(
    root: &Map<String, Value>,
    key: &str,
    label_keys: &[&str],
) -> Result<Vec<Stanza>, PayloadError> {
    list_of_objects(root, key)?
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let path = format!("$.{key}[{idx}]");
            let directives = to_directives(row, &path)?;
            let label = label_keys
                .iter()
                .filter_map(|k| directives.get(k).and_then(DirectiveValue::as_scalar))
                .map(str::trim)
                .find(|label| !label.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| (idx + 1).to_string());
            Ok(Stanza {
                label,
                line: None,
                directives,
            })
        })
        .collect()
}

fn list_of_objects<'a>(
    root: &'a Map<String, Value>,
    key: &str,
) -> Result<Vec<&'a Map<String, Value>>, PayloadError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| as_object(item, &format!("$.{key}[{idx}]")))
            .collect(),
        Some(_) => Err(shape(&format!("$.{key}"), "a list of objects")),
    }
}

fn to_directives(row: &Map<String, Value>, path: &str) -> Result<DirectiveMap, PayloadError> {
    let mut map = DirectiveMap::new();
    for (key, value) in row {
        let field_path = format!("{path}.{key}");
        let directive = match value {
            Value::Null => continue,
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    if let Some(text) = scalar_text(item, &format!("{field_path}[{idx}]"))? {
                        values.push(text);
                    }
                }
                DirectiveValue::List(values)
            }
            other => match scalar_text(other, &field_path)? {
                Some(text) => DirectiveValue::Scalar(text),
                None => continue,
            },
        };
        map.insert(key, directive);
    }
    Ok(map)
}

fn scalar_text(value: &Value, path: &str) -> Result<Option<String>, PayloadError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(shape(path, "a string, number or null")),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, PayloadError> {
    value.as_object().ok_or_else(|| shape(path, "an object"))
}

fn shape(path: &str, expected: &'static str) -> PayloadError {
    PayloadError::InvalidPayloadShape {
        path: path.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{decode_nat_payload, decode_policy_payload, NatMode, PayloadError};
    use crate::vip::VipProtocol;
    use crate::warning::WarningCode;

    #[test]
    fn decodes_lists_strings_and_numbers() {
        let payload = decode_nat_payload(
            br#"{
                "mode": "central",
                "csnat": [{"id": 1, "orig_addr": ["LAN1", null, "LAN2"], "nat_ippool": "Pool"}],
                "vip": [{"name": "web", "external_ip": "203.0.113.5", "mapped_ip": "10.0.0.5",
                         "protocol": "TCP", "external_port": 443}]
            }"#,
        )
        .expect("decode");

        assert_eq!(payload.mode, Some(NatMode::Central));
        assert_eq!(payload.csnat[0].id, "1");
        assert_eq!(payload.csnat[0].orig_addr, vec!["LAN1", "LAN2"]);
        assert_eq!(payload.vip[0].protocol, Some(VipProtocol::Tcp));
        assert_eq!(payload.vip[0].external_port.as_deref(), Some("443"));
        assert!(payload.warnings.is_empty());
    }

    #[test]
    fn missing_lists_are_empty() {
        let payload = decode_nat_payload(br#"{}"#).expect("decode");
        assert!(payload.csnat.is_empty() && payload.vip.is_empty() && payload.udt.is_empty());
    }

    #[test]
    fn rows_without_ids_get_positional_labels() {
        let payload = decode_nat_payload(
            br#"{"vip": [{"external_ip": "1.1.1.1", "mapped_ip": "10.0.0.1"},
                         {"external_ip": "1.1.1.2", "mapped_ip": "10.0.0.2"}]}"#,
        )
        .expect("decode");
        let names: Vec<_> = payload.vip.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["1", "2"]);
    }

    #[test]
    fn ineligible_rows_become_warnings() {
        let payload = decode_nat_payload(
            br#"{"csnat": [{"orig_addr": "LAN"}, {"orig_addr": "LAN", "nat_ippool": "P"}]}"#,
        )
        .expect("decode");
        assert_eq!(payload.csnat.len(), 1);
        assert_eq!(payload.warnings.len(), 1);
        assert_eq!(payload.warnings[0].code, WarningCode::MissingRequiredField);
        assert_eq!(payload.warnings[0].line, None);
    }

    #[test]
    fn non_list_section_is_invalid_shape() {
        let err = decode_nat_payload(br#"{"csnat": {"orig_addr": "LAN"}}"#).expect_err("fail");
        match err {
            PayloadError::InvalidPayloadShape { path, .. } => assert_eq!(path, "$.csnat"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nested_object_value_is_invalid_shape() {
        let err = decode_nat_payload(br#"{"vip": [{"mapped_ip": {"a": 1}}]}"#).expect_err("fail");
        assert!(err.to_string().contains("$.vip[0].mapped_ip"));
    }

    #[test]
    fn non_object_root_is_invalid_shape() {
        let err = decode_nat_payload(b"[1, 2]").expect_err("fail");
        assert!(matches!(err, PayloadError::InvalidPayloadShape { .. }));
        let err = decode_nat_payload(b"{").expect_err("fail");
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn policy_payload_counts_rows() {
        let payload = decode_policy_payload(
            br#"{"policies": [{"id": "1", "action": "accept", "srcaddr": "LAN"}, {"id": ""}]}"#,
        )
        .expect("decode");
        assert_eq!(payload.received, 2);
        assert_eq!(payload.policies.len(), 2);
        assert_eq!(payload.policies[0].srcaddr, vec!["LAN"]);
        assert_eq!(payload.policies[1].id, "2");
    }

    #[test]
    fn positional_label_may_repeat_an_explicit_name() {
        let payload = decode_nat_payload(
            br#"{"vip": [{"external_ip": "1.1.1.1", "mapped_ip": "10.0.0.1"},
                         {"name": "1", "external_ip": "1.1.1.2", "mapped_ip": "10.0.0.2"}]}"#,
        )
        .expect("decode");
        assert_eq!(payload.vip.len(), 2);
        assert!(payload.warnings.is_empty());
    }

    #[test]
    fn blank_id_falls_back_to_position() {
        let payload = decode_nat_payload(
            br#"{"csnat": [{"id": "", "orig_addr": "LAN", "nat_ippool": "P"},
                           {"id": "  ", "orig_addr": "DMZ", "nat_ippool": "Q"}]}"#,
        )
        .expect("decode");
        let ids: Vec<_> = payload.csnat.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert!(payload.warnings.is_empty());
    }
}
