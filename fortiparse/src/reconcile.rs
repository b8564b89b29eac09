//! Merge of source-NAT and destination-NAT rules into export rows.
//!
//! ## Column mapping
//!
//! | column            | central SNAT      | VIP (DNAT)                  |
//! |-------------------|-------------------|-----------------------------|
//! | ENA Public        | `nat_ippool`      | `external_ip`               |
//! | Mapped Private    | `orig_addr`       | `mapped_ip`                 |
//! | SNAT/DNAT         | `SNAT`            | `DNAT`                      |
//! | UDT Publics       | blank             | `protocol/port`, `port`, "" |
//! | Mapped Private #2 | blank             | `mapped_ip`                 |
//! | SNAT/DNAT #2      | blank             | `DNAT`                      |
//!
//! Rows come out SNAT first, then DNAT, each in input order. Nothing is
//! filtered here; eligibility is decided when records are built.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::central_snat::CentralSnatRule;
use crate::vip::{VipProtocol, VipRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NatKind {
    #[serde(rename = "SNAT")]
    Snat,
    #[serde(rename = "DNAT")]
    Dnat,
}

impl NatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snat => "SNAT",
            Self::Dnat => "DNAT",
        }
    }
}

impl Display for NatKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the six-column NAT summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub ena_public: String,
    pub mapped_private: String,
    pub kind: NatKind,
    pub udt_publics: String,
    /// Second "Mapped Private" column; DNAT rows only.
    pub dnat_mapped_private: String,
    /// Second "SNAT/DNAT" column; DNAT rows only.
    pub dnat_kind: Option<NatKind>,
}

impl ExportRow {
    /// Cells in column order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.ena_public.as_str(),
            self.mapped_private.as_str(),
            self.kind.as_str(),
            self.udt_publics.as_str(),
            self.dnat_mapped_private.as_str(),
            self.dnat_kind.map_or("", NatKind::as_str),
        ]
    }
}

/// Build export rows: every SNAT rule, then every VIP rule.
pub fn reconcile(csnat: &[CentralSnatRule], vip: &[VipRule]) -> Vec<ExportRow> {
    let mut rows = Vec::with_capacity(csnat.len() + vip.len());
    rows.extend(csnat.iter().map(snat_row));
    rows.extend(vip.iter().map(dnat_row));
    rows
}

pub fn snat_row(rule: &CentralSnatRule) -> ExportRow {
    ExportRow {
        ena_public: join_names(&rule.nat_ippool),
        mapped_private: join_names(&rule.orig_addr),
        kind: NatKind::Snat,
        udt_publics: String::new(),
        dnat_mapped_private: String::new(),
        dnat_kind: None,
    }
}

pub fn dnat_row(rule: &VipRule) -> ExportRow {
    let mapped = rule.mapped_ip.trim().to_string();
    ExportRow {
        ena_public: rule.external_ip.trim().to_string(),
        mapped_private: mapped.clone(),
        kind: NatKind::Dnat,
        udt_publics: udt_publics(rule.protocol, rule.external_port.as_deref()),
        dnat_mapped_private: mapped,
        dnat_kind: Some(NatKind::Dnat),
    }
}

/// `tcp/443` when both are known, `443` with only a port, else empty.
pub fn udt_publics(protocol: Option<VipProtocol>, port: Option<&str>) -> String {
    let port = port.map(str::trim).filter(|p| !p.is_empty());
    match (protocol, port) {
        (Some(protocol), Some(port)) => format!("{protocol}/{port}"),
        (None, Some(port)) => port.to_string(),
        (_, None) => String::new(),
    }
}

/// Trimmed, non-empty names joined with `,`.
pub fn join_names(names: &[String]) -> String {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{join_names, reconcile, udt_publics, NatKind};
    use crate::central_snat::CentralSnatRule;
    use crate::vip::{VipProtocol, VipRule};

    fn vip(name: &str, protocol: Option<VipProtocol>, port: Option<&str>) -> VipRule {
        VipRule {
            name: name.to_string(),
            external_ip: "203.0.113.5".to_string(),
            mapped_ip: "10.0.0.5".to_string(),
            protocol,
            external_port: port.map(str::to_string),
        }
    }

    #[test]
    fn empty_inputs_give_no_rows() {
        assert!(reconcile(&[], &[]).is_empty());
    }

    #[test]
    fn snat_rows_leave_dnat_columns_blank() {
        let rule = CentralSnatRule {
            id: "1".to_string(),
            orig_addr: vec!["LAN1".to_string()],
            nat_ippool: vec!["PublicPool1".to_string()],
        };
        let rows = reconcile(&[rule], &[]);
        assert_eq!(
            rows[0].cells(),
            ["PublicPool1", "LAN1", "SNAT", "", "", ""]
        );
    }

    #[test]
    fn dnat_rows_fill_duplicate_columns() {
        let rows = reconcile(&[], &[vip("web", Some(VipProtocol::Tcp), Some("443"))]);
        assert_eq!(
            rows[0].cells(),
            ["203.0.113.5", "10.0.0.5", "DNAT", "tcp/443", "10.0.0.5", "DNAT"]
        );
        assert_eq!(rows[0].dnat_kind, Some(NatKind::Dnat));
    }

    #[test]
    fn snat_rows_precede_dnat_rows() {
        let snat = CentralSnatRule {
            id: "7".to_string(),
            orig_addr: vec!["A".to_string(), "B".to_string()],
            nat_ippool: vec!["P".to_string()],
        };
        let rows = reconcile(
            std::slice::from_ref(&snat),
            &[vip("x", None, None), vip("y", None, Some("8080"))],
        );
        let kinds: Vec<_> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![NatKind::Snat, NatKind::Dnat, NatKind::Dnat]);
        assert_eq!(rows[0].mapped_private, "A,B");
        assert_eq!(rows[2].udt_publics, "8080");
    }

    #[test]
    fn udt_publics_never_emits_bare_separator() {
        assert_eq!(udt_publics(Some(VipProtocol::Udp), Some(" 53 ")), "udp/53");
        assert_eq!(udt_publics(None, Some("8000-8080")), "8000-8080");
        assert_eq!(udt_publics(Some(VipProtocol::Tcp), None), "");
        assert_eq!(udt_publics(Some(VipProtocol::Tcp), Some("  ")), "");
        assert_eq!(udt_publics(None, None), "");
    }

    #[test]
    fn join_names_skips_blank_entries() {
        let names = vec![" a ".to_string(), String::new(), "b".to_string()];
        assert_eq!(join_names(&names), "a,b");
    }
}
