//! Virtual IP (destination-NAT) records (`config firewall vip`).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use fortiparse_core::DirectiveMap;
use serde::{Deserialize, Serialize};

use crate::record::{is_disabled, text, BuildOutcome, RuleRecord};
use crate::section::Section;
use crate::warning::{Issue, WarningCode};

const EXTERNAL_IP_KEYS: &[&str] = &["extip", "external-ip", "external_ip"];
const MAPPED_IP_KEYS: &[&str] = &["mappedip", "mapped-ip", "mapped_ip"];
const EXTERNAL_PORT_KEYS: &[&str] = &["extport", "external-port", "external_port"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VipProtocol {
    Tcp,
    Udp,
}

impl FromStr for VipProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            other => Err(other.to_string()),
        }
    }
}

impl Display for VipProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => f.write_str("tcp"),
            Self::Udp => f.write_str("udp"),
        }
    }
}

/// Maps a public address (and optional port) to an internal one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipRule {
    pub name: String,
    pub external_ip: String,
    pub mapped_ip: String,
    #[serde(default)]
    pub protocol: Option<VipProtocol>,
    /// Single port or `low-high` range.
    #[serde(default)]
    pub external_port: Option<String>,
}

impl RuleRecord for VipRule {
    const SECTION: Section = Section::Vip;

    fn build(label: &str, directives: &DirectiveMap) -> BuildOutcome<Self> {
        let name = label.trim();
        if name.is_empty() {
            return BuildOutcome::Dropped(Issue::missing("name"));
        }
        if is_disabled(directives) {
            return BuildOutcome::Disabled;
        }

        let Some(external_ip) = text(directives, EXTERNAL_IP_KEYS) else {
            return BuildOutcome::Dropped(Issue::missing("external_ip"));
        };
        let Some(mapped_ip) = text(directives, MAPPED_IP_KEYS) else {
            return BuildOutcome::Dropped(Issue::missing("mapped_ip"));
        };

        let mut issues = Vec::new();
        let protocol = match text(directives, &["protocol"]) {
            None => None,
            Some(raw) => match raw.parse::<VipProtocol>() {
                Ok(protocol) => Some(protocol),
                Err(other) => {
                    issues.push(Issue::new(
                        WarningCode::UnsupportedProtocol,
                        format!(
                            "protocol '{other}' is not tcp or udp; \
                             UDT Publics shows the bare port instead of '{other}/<port>'"
                        ),
                    ));
                    None
                }
            },
        };

        BuildOutcome::Built {
            record: Self {
                name: name.to_string(),
                external_ip,
                mapped_ip,
                protocol,
                external_port: text(directives, EXTERNAL_PORT_KEYS),
            },
            issues,
        }
    }

    fn key(&self) -> &str {
        &self.name
    }
}
