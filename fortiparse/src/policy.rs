//! Firewall policy records (`config firewall policy`).
//!
//! Only the identifier is required. Interfaces default to empty, address and
//! service lists default to empty, and a missing `action` falls back to
//! `deny` so an incomplete stanza never reads as permissive.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use fortiparse_core::DirectiveMap;
use serde::{Deserialize, Serialize};

use crate::record::{is_disabled, names, text, BuildOutcome, RuleRecord};
use crate::section::Section;
use crate::warning::{Issue, WarningCode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    Accept,
    #[default]
    Deny,
    Ipsec,
}

impl FromStr for PolicyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "deny" => Ok(Self::Deny),
            "ipsec" => Ok(Self::Ipsec),
            other => Err(format!("unknown policy action '{other}'")),
        }
    }
}

impl Display for PolicyAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => f.write_str("accept"),
            Self::Deny => f.write_str("deny"),
            Self::Ipsec => f.write_str("ipsec"),
        }
    }
}

/// One firewall policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    pub id: String,
    pub srcintf: String,
    pub dstintf: String,
    pub action: PolicyAction,
    pub srcaddr: Vec<String>,
    pub dstaddr: Vec<String>,
    pub service: Vec<String>,
    #[serde(default)]
    pub comments: String,
}

impl RuleRecord for PolicyRule {
    const SECTION: Section = Section::Policy;

    fn build(label: &str, directives: &DirectiveMap) -> BuildOutcome<Self> {
        let id = label.trim();
        if id.is_empty() {
            return BuildOutcome::Dropped(Issue::missing("id"));
        }
        if is_disabled(directives) {
            return BuildOutcome::Disabled;
        }

        let action = match text(directives, &["action"]) {
            None => PolicyAction::default(),
            Some(raw) => match raw.parse() {
                Ok(action) => action,
                Err(message) => {
                    return BuildOutcome::Dropped(Issue::new(
                        WarningCode::InvalidFieldValue,
                        message,
                    ))
                }
            },
        };

        BuildOutcome::built(Self {
            id: id.to_string(),
            srcintf: text(directives, &["srcintf"]).unwrap_or_default(),
            dstintf: text(directives, &["dstintf"]).unwrap_or_default(),
            action,
            srcaddr: names(directives, &["srcaddr"]),
            dstaddr: names(directives, &["dstaddr"]),
            service: names(directives, &["service"]),
            comments: directives
                .get_any(&["comments", "comment"])
                .map(|v| v.values().join(" ").trim().to_string())
                .unwrap_or_default(),
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}
