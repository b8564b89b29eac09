//! Serialization of export rows into the fixed six-column table.
//!
//! Header names repeat on purpose. Downstream spreadsheet consumers match
//! columns by position, so the duplicate `Mapped Private` and `SNAT/DNAT`
//! headers are written as-is and never deduplicated.
//!
//! The workbook format writes one worksheet named after the configured
//! sheet name. Blank cells are left unwritten.

use rust_xlsxwriter::{Workbook, XlsxError};
use serde::Serialize;
use thiserror::Error;

use crate::reconcile::ExportRow;
use crate::settings::{ExportSettings, LineTerminator};

/// Column headers, in order.
pub const EXPORT_HEADERS: [&str; 6] = [
    "ENA Public",
    "Mapped Private",
    "SNAT/DNAT",
    "UDT Publics",
    "Mapped Private",
    "SNAT/DNAT",
];

pub const XLSX_FILENAME: &str = "Fortigate_NAT.xlsx";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_FILENAME: &str = "Fortigate_NAT.csv";
pub const CSV_MIME: &str = "text/csv";
pub const JSON_FILENAME: &str = "Fortigate_NAT.json";
pub const JSON_MIME: &str = "application/json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

/// Errors raised while serializing rows.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finish CSV output: {0}")]
    Flush(String),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("{0} rows do not fit in one worksheet")]
    TooManyRows(usize),
}

/// Bytes plus the metadata the spreadsheet writer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: &'static str,
    pub mime: &'static str,
    pub sheet_name: String,
    pub bytes: Vec<u8>,
}

/// Serialize rows in the requested format.
pub fn project(
    rows: &[ExportRow],
    format: ExportFormat,
    settings: &ExportSettings,
) -> Result<ExportArtifact, ExportError> {
    let (filename, mime, bytes) = match format {
        ExportFormat::Xlsx => (XLSX_FILENAME, XLSX_MIME, to_xlsx(rows, settings)?),
        ExportFormat::Csv => (CSV_FILENAME, CSV_MIME, to_csv(rows, settings)?),
        ExportFormat::Json => (JSON_FILENAME, JSON_MIME, to_json(rows, settings)?),
    };
    Ok(ExportArtifact {
        filename,
        mime,
        sheet_name: settings.sheet_name.clone(),
        bytes,
    })
}

/// Header line followed by one line per row.
pub fn to_csv(rows: &[ExportRow], settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    let terminator = match settings.line_terminator {
        LineTerminator::Lf => csv::Terminator::Any(b'\n'),
        LineTerminator::Crlf => csv::Terminator::CRLF,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(settings.delimiter)
        .terminator(terminator)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))
}

/// Workbook with a header row followed by one row per export row.
pub fn to_xlsx(rows: &[ExportRow], settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(settings.sheet_name.as_str())?;

    for (col, header) in (0u16..).zip(EXPORT_HEADERS) {
        sheet.write_string(0, col, header)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let line = u32::try_from(idx + 1).map_err(|_| ExportError::TooManyRows(rows.len()))?;
        for (col, cell) in (0u16..).zip(row.cells()) {
            if !cell.is_empty() {
                sheet.write_string(line, col, cell)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[derive(Serialize)]
struct JsonTable<'a> {
    sheet: &'a str,
    columns: [&'static str; 6],
    rows: Vec<[&'a str; 6]>,
}

/// `{"sheet", "columns", "rows"}` with positional rows.
pub fn to_json(rows: &[ExportRow], settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
    let table = JsonTable {
        sheet: &settings.sheet_name,
        columns: EXPORT_HEADERS,
        rows: rows.iter().map(ExportRow::cells).collect(),
    };
    let mut bytes = serde_json::to_vec_pretty(&table)?;
    bytes.push(b'\n');
    Ok(bytes)
}
