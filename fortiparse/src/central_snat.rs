//! Central source-NAT records (`config firewall central-snat-map`).

use fortiparse_core::DirectiveMap;
use serde::{Deserialize, Serialize};

use crate::record::{is_disabled, names, BuildOutcome, RuleRecord};
use crate::section::Section;
use crate::warning::Issue;

const ORIG_ADDR_KEYS: &[&str] = &["orig-addr", "orig_addr"];
const NAT_IPPOOL_KEYS: &[&str] = &["nat-ippool", "nat_ippool"];

/// Maps an internal address set to a public pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralSnatRule {
    pub id: String,
    pub orig_addr: Vec<String>,
    pub nat_ippool: Vec<String>,
}

impl RuleRecord for CentralSnatRule {
    const SECTION: Section = Section::CentralSnat;

    fn build(label: &str, directives: &DirectiveMap) -> BuildOutcome<Self> {
        let id = label.trim();
        if id.is_empty() {
            return BuildOutcome::Dropped(Issue::missing("id"));
        }
        if is_disabled(directives) {
            return BuildOutcome::Disabled;
        }

        let orig_addr = names(directives, ORIG_ADDR_KEYS);
        if orig_addr.is_empty() {
            return BuildOutcome::Dropped(Issue::missing("orig_addr"));
        }
        let nat_ippool = names(directives, NAT_IPPOOL_KEYS);
        if nat_ippool.is_empty() {
            return BuildOutcome::Dropped(Issue::missing("nat_ippool"));
        }

        BuildOutcome::built(Self {
            id: id.to_string(),
            orig_addr,
            nat_ippool,
        })
    }

    fn key(&self) -> &str {
        &self.id
    }
}
