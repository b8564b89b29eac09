//! End-to-end export: source records → rows → bytes.
//!
//! Three sources feed the same tail: a raw NAT dump, a JSON payload, or the
//! last NAT parse held in a caller-owned [`SessionStore`].

use fortiparse_core::ParseError;
use thiserror::Error;

use crate::central_snat::CentralSnatRule;
use crate::export::{project, ExportArtifact, ExportError, ExportFormat};
use crate::payload::{decode_nat_payload, PayloadError};
use crate::reconcile::reconcile;
use crate::section::parse_nat;
use crate::session::{SessionError, SessionId, SessionStore};
use crate::settings::ExportSettings;
use crate::vip::VipRule;
use crate::warning::ParseWarning;

/// Any fatal error of one export call. No partial output accompanies it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Serialized export plus what was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    pub rows: usize,
    pub warnings: Vec<ParseWarning>,
}

/// Export straight from a NAT configuration dump.
pub fn export_from_text(
    text: &str,
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<ExportOutcome, PipelineError> {
    let nat = parse_nat(text)?;
    finish(&nat.csnat, &nat.vip, nat.warnings, format, settings)
}

/// Export from a `{ csnat: [...], vip: [...] }` JSON payload.
pub fn export_from_payload(
    bytes: &[u8],
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<ExportOutcome, PipelineError> {
    let payload = decode_nat_payload(bytes)?;
    finish(&payload.csnat, &payload.vip, payload.warnings, format, settings)
}

/// Export the NAT collections last stored for `id`.
pub fn export_from_session(
    store: &SessionStore,
    id: &SessionId,
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<ExportOutcome, PipelineError> {
    let state = store.require(id)?;
    finish(&state.csnat, &state.vip, Vec::new(), format, settings)
}

fn finish(
    csnat: &[CentralSnatRule],
    vip: &[VipRule],
    warnings: Vec<ParseWarning>,
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<ExportOutcome, PipelineError> {
    let rows = reconcile(csnat, vip);
    tracing::debug!(rows = rows.len(), snat = csnat.len(), dnat = vip.len(), "reconciled NAT rules");
    let artifact = project(&rows, format, settings)?;
    Ok(ExportOutcome {
        artifact,
        rows: rows.len(),
        warnings,
    })
}
