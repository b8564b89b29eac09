//! Routing of `edit` stanzas to their section builders.
//!
//! Stanzas are routed by the label of the enclosing `config` block. The
//! single-section entry points also accept bare top-level `edit` blocks and
//! treat them as belonging to the requested section. `config vdom` and
//! `config global` wrappers are descended into.

use std::fmt::{self, Display, Formatter};

use fortiparse_core::{extract, tokenize, BlockKind, ConfigBlock, ParseError};
use serde::{Deserialize, Serialize};

use crate::central_snat::CentralSnatRule;
use crate::policy::PolicyRule;
use crate::record::{collect_records, Collected, RuleRecord, Stanza};
use crate::vip::VipRule;
use crate::warning::{Issue, ParseWarning, WarningCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Policy,
    #[serde(rename = "central-snat-map")]
    CentralSnat,
    Vip,
}

impl Section {
    /// Map a `config` label such as `firewall vip` to a section.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_lowercase().as_str() {
            "firewall policy" => Some(Self::Policy),
            "firewall central-snat-map" => Some(Self::CentralSnat),
            "firewall vip" => Some(Self::Vip),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::CentralSnat => "central-snat-map",
            Self::Vip => "vip",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records of one section plus non-fatal warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseOutcome<T> {
    pub records: Vec<T>,
    pub warnings: Vec<ParseWarning>,
    /// Disabled stanzas that produced no record.
    pub skipped: usize,
}

/// Both NAT collections from one dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NatParse {
    pub csnat: Vec<CentralSnatRule>,
    pub vip: Vec<VipRule>,
    pub warnings: Vec<ParseWarning>,
    pub skipped: usize,
}

/// Parse `show firewall policy` output.
pub fn parse_policies(text: &str) -> Result<ParseOutcome<PolicyRule>, ParseError> {
    parse_single(text)
}

/// Parse `config firewall central-snat-map` output.
pub fn parse_central_snat(text: &str) -> Result<ParseOutcome<CentralSnatRule>, ParseError> {
    parse_single(text)
}

/// Parse `config firewall vip` output.
pub fn parse_vips(text: &str) -> Result<ParseOutcome<VipRule>, ParseError> {
    parse_single(text)
}

/// Parse a dump holding central-snat-map and/or vip sections.
pub fn parse_nat(text: &str) -> Result<NatParse, ParseError> {
    let blocks = tokenize(text)?;
    let mut routed = Routed::default();
    route(
        &blocks,
        &[Section::CentralSnat, Section::Vip],
        &mut routed,
    );

    let mut csnat_stanzas = Vec::new();
    let mut vip_stanzas = Vec::new();
    for (section, stanza) in routed.stanzas {
        match section {
            Section::CentralSnat => csnat_stanzas.push(stanza),
            Section::Vip => vip_stanzas.push(stanza),
            Section::Policy => {}
        }
    }

    let csnat: Collected<CentralSnatRule> = collect_records(csnat_stanzas);
    let vip: Collected<VipRule> = collect_records(vip_stanzas);
    tracing::debug!(
        csnat = csnat.records.len(),
        vip = vip.records.len(),
        "parsed NAT dump"
    );

    let mut warnings = routed.warnings;
    warnings.extend(csnat.warnings);
    warnings.extend(vip.warnings);

    Ok(NatParse {
        csnat: csnat.records,
        vip: vip.records,
        warnings,
        skipped: csnat.skipped + vip.skipped,
    })
}

fn parse_single<R: RuleRecord>(text: &str) -> Result<ParseOutcome<R>, ParseError> {
    let blocks = tokenize(text)?;
    let mut routed = Routed::default();
    route(&blocks, &[R::SECTION], &mut routed);

    let collected: Collected<R> =
        collect_records(routed.stanzas.into_iter().map(|(_, stanza)| stanza));
    tracing::debug!(
        section = %R::SECTION,
        records = collected.records.len(),
        warnings = collected.warnings.len(),
        "parsed section"
    );

    let mut warnings = routed.warnings;
    warnings.extend(collected.warnings);
    Ok(ParseOutcome {
        records: collected.records,
        warnings,
        skipped: collected.skipped,
    })
}

#[derive(Default)]
struct Routed {
    stanzas: Vec<(Section, Stanza)>,
    warnings: Vec<ParseWarning>,
}

fn route(blocks: &[ConfigBlock], wanted: &[Section], out: &mut Routed) {
    for block in blocks {
        match block.kind {
            BlockKind::Edit => match wanted {
                [only] => out.stanzas.push((*only, stanza(block))),
                _ => out.warnings.push(ParseWarning::from_issue(
                    Issue::new(
                        WarningCode::UnknownSection,
                        "edit block outside any config section cannot be routed",
                    ),
                    None,
                    &block.label,
                    Some(block.line),
                )),
            },
            BlockKind::Config => match Section::from_label(&block.label) {
                Some(section) if wanted.contains(&section) => {
                    for edit in block.edits() {
                        out.stanzas.push((section, stanza(edit)));
                    }
                }
                Some(section) => {
                    tracing::debug!(%section, line = block.line, "ignoring section not requested");
                }
                None if is_container(&block.label) => {
                    for child in &block.children {
                        match child.kind {
                            BlockKind::Edit => route(&child.children, wanted, out),
                            BlockKind::Config => route(std::slice::from_ref(child), wanted, out),
                        }
                    }
                }
                None => out.warnings.push(ParseWarning::from_issue(
                    Issue::new(
                        WarningCode::UnknownSection,
                        format!("section 'config {}' is not recognized", block.label),
                    ),
                    None,
                    &block.label,
                    Some(block.line),
                )),
            },
        }
    }
}

/// `config vdom` holds `edit <vdom>` blocks; `config global` holds sections.
fn is_container(label: &str) -> bool {
    matches!(label.trim().to_ascii_lowercase().as_str(), "vdom" | "global")
}

fn stanza(block: &ConfigBlock) -> Stanza {
    Stanza {
        label: block.label.clone(),
        line: Some(block.line),
        directives: extract(block),
    }
}
