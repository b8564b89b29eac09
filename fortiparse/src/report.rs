use colored::Colorize;

use crate::central_snat::CentralSnatRule;
use crate::policy::{PolicyAction, PolicyRule};
use crate::reconcile::join_names;
use crate::vip::VipRule;
use crate::warning::ParseWarning;

/// Render policy records, one line per rule.
pub fn render_policies(rules: &[PolicyRule]) -> String {
    let mut out = Vec::new();
    for rule in rules {
        let action = match rule.action {
            PolicyAction::Accept => rule.action.to_string().green(),
            PolicyAction::Deny => rule.action.to_string().red(),
            PolicyAction::Ipsec => rule.action.to_string().blue(),
        };
        let mut line = format!(
            "policy {} {} -> {} action={} src={} dst={} service={}",
            rule.id,
            or_dash(&rule.srcintf),
            or_dash(&rule.dstintf),
            action,
            list_or_dash(&rule.srcaddr),
            list_or_dash(&rule.dstaddr),
            list_or_dash(&rule.service)
        );
        if !rule.comments.is_empty() {
            line.push_str(&format!(" comments=\"{}\"", rule.comments));
        }
        out.push(line);
    }
    out.join("\n")
}

/// Render central SNAT rules then VIPs.
pub fn render_nat(csnat: &[CentralSnatRule], vip: &[VipRule]) -> String {
    let mut out = Vec::new();
    out.push("central-snat-map".bold().to_string());
    for rule in csnat {
        out.push(format!(
            "- {}: {} => {}",
            rule.id,
            join_names(&rule.orig_addr),
            join_names(&rule.nat_ippool)
        ));
    }
    out.push("vip".bold().to_string());
    for rule in vip {
        let mut line = format!("- {}: {} => {}", rule.name, rule.external_ip, rule.mapped_ip);
        if let Some(protocol) = rule.protocol {
            line.push_str(&format!(" protocol={protocol}"));
        }
        if let Some(port) = &rule.external_port {
            line.push_str(&format!(" extport={port}"));
        }
        out.push(line);
    }
    out.join("\n")
}

pub fn render_warnings(warnings: &[ParseWarning]) -> String {
    warnings
        .iter()
        .map(|w| format!("{} {w}", "WARN".yellow()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `parse_summary records=.. warnings=.. skipped=..`
pub fn render_parse_summary(records: usize, warnings: usize, skipped: usize) -> String {
    format!("parse_summary records={records} warnings={warnings} skipped={skipped}")
        .cyan()
        .to_string()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn list_or_dash(values: &[String]) -> String {
    let joined = join_names(values);
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
