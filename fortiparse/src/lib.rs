//! FortiGate configuration dump parsing and NAT summary export.
//!
//! Turns `show` output from a FortiGate into typed firewall records and
//! projects the NAT rules into a fixed six-column summary table.
//!
//! # Architecture
//!
//! ## Records
//!
//! - [`policy`]: `config firewall policy` rules
//! - [`central_snat`]: `config firewall central-snat-map` rules
//! - [`vip`]: `config firewall vip` destination NAT objects
//! - [`record`]: shared builder contract and duplicate handling
//! - [`section`]: routing of edit stanzas to builders, parse entry points
//! - [`warning`]: non-fatal problems reported alongside records
//!
//! ## Export
//!
//! - [`reconcile`]: merge SNAT and DNAT rules into export rows
//! - [`export`]: CSV and JSON projection of rows
//! - [`payload`]: JSON request payload decoding
//! - [`pipeline`]: parse, reconcile and project in one call
//! - [`settings`]: export layout settings (TOML)
//!
//! ## Utilities
//!
//! - [`session`]: caller-owned per-session working set
//! - [`report`]: colored terminal rendering
//!
//! # Examples
//!
//! ```ignore
//! use fortiparse::export::ExportFormat;
//! use fortiparse::pipeline::export_from_text;
//! use fortiparse::settings::default_settings;
//!
//! let dump = std::fs::read_to_string("nat.conf")?;
//! let outcome = export_from_text(&dump, ExportFormat::Csv, &default_settings())?;
//! std::fs::write(outcome.artifact.filename, &outcome.artifact.bytes)?;
//! ```
//!
//! # Built on fortiparse-core
//!
//! Block tokenizing and directive extraction live in `fortiparse-core`, which
//! knows nothing about individual firewall sections.

pub mod central_snat;
pub mod export;
pub mod payload;
pub mod pipeline;
pub mod policy;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod section;
pub mod session;
pub mod settings;
pub mod vip;
pub mod warning;
