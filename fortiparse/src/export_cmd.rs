use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fortiparse::export::ExportFormat;
use fortiparse::pipeline::{
    export_from_payload, export_from_session, export_from_text, ExportOutcome,
};
use fortiparse::report::render_warnings;
use fortiparse::session::SessionStore;
use fortiparse::settings::resolve_settings;

use crate::cli::{ExportArgs, ExportFormatArg};
use crate::input::{describe, is_stdio, read_bytes, read_text};
use crate::path_guard;

pub fn run_export(args: ExportArgs) -> Result<()> {
    let session = args.session.target();
    let sources = [args.payload.is_some(), args.nat.is_some(), session.is_some()]
        .iter()
        .filter(|given| **given)
        .count();
    if sources != 1 {
        bail!("export needs exactly one source: --payload, --nat, or --session with --session-id");
    }

    let (settings, settings_source) = resolve_settings(args.settings.as_deref());
    tracing::debug!(source = %settings_source, "export settings loaded");
    let format = match args.format {
        ExportFormatArg::Xlsx => ExportFormat::Xlsx,
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Json => ExportFormat::Json,
    };

    let mut inputs: Vec<&Path> = Vec::new();
    let outcome: ExportOutcome = if let Some(path) = &args.payload {
        inputs.push(path);
        let bytes = read_bytes(path)?;
        export_from_payload(&bytes, format, &settings)
            .with_context(|| format!("failed to export payload {}", describe(path)))?
    } else if let Some(path) = &args.nat {
        inputs.push(path);
        let text = read_text(path)?;
        export_from_text(&text, format, &settings)
            .with_context(|| format!("failed to export NAT dump {}", describe(path)))?
    } else if let Some((path, id)) = &session {
        inputs.push(path);
        let store = SessionStore::load_file(path)
            .with_context(|| format!("failed to load session store {}", path.display()))?;
        export_from_session(&store, id, format, &settings)
            .with_context(|| format!("failed to export session '{id}'"))?
    } else {
        bail!("no export source given");
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(outcome.artifact.filename));
    path_guard::ensure_output_not_same(&output, &inputs)?;

    if !outcome.warnings.is_empty() {
        eprintln!("{}", render_warnings(&outcome.warnings));
    }

    if is_stdio(&output) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&outcome.artifact.bytes)
            .context("failed to write export to stdout")?;
        stdout.flush().context("failed to flush stdout")?;
    } else {
        fs::write(&output, &outcome.artifact.bytes)
            .with_context(|| format!("failed to write export {}", output.display()))?;
        eprintln!(
            "wrote {} rows to {} ({}, sheet '{}')",
            outcome.rows,
            output.display(),
            outcome.artifact.mime,
            outcome.artifact.sheet_name
        );
    }

    Ok(())
}
