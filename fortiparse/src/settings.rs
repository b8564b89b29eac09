use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters a worksheet name may not contain.
const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// How export rows are laid out on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSettings {
    pub delimiter: u8,
    pub line_terminator: LineTerminator,
    pub sheet_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delimiter: b',',
            line_terminator: LineTerminator::Lf,
            sheet_name: "NAT Summary".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    #[default]
    Lf,
    Crlf,
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    export: RawExportSettings,
}

#[derive(Debug, Default, Deserialize)]
struct RawExportSettings {
    delimiter: Option<String>,
    line_terminator: Option<LineTerminator>,
    sheet_name: Option<String>,
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid settings in {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Load export settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<ExportSettings, SettingsLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_settings(&raw, path.display().to_string())
}

/// Built-in settings shipped with the binary.
pub fn default_settings() -> ExportSettings {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/settings/export.toml"));
    parse_settings(embedded, "embedded settings".to_string()).unwrap_or_default()
}

/// Load from `path` when given, falling back to the embedded defaults.
///
/// Returns the settings and where they came from (`embedded` or `file:<path>`).
pub fn resolve_settings(path: Option<&Path>) -> (ExportSettings, String) {
    let Some(path) = path else {
        return (default_settings(), "embedded".to_string());
    };

    match load_settings(path) {
        Ok(settings) => (settings, format!("file:{}", path.display())),
        Err(err) => {
            tracing::warn!("{err}; using embedded defaults");
            (default_settings(), "embedded".to_string())
        }
    }
}

fn parse_settings(raw: &str, path: String) -> Result<ExportSettings, SettingsLoadError> {
    let parsed: SettingsFile = toml::from_str(raw).map_err(|source| SettingsLoadError::Parse {
        path: path.clone(),
        source,
    })?;
    let defaults = ExportSettings::default();
    let raw = parsed.export;

    let delimiter = match raw.delimiter.as_deref() {
        None => defaults.delimiter,
        Some(value) => match value.as_bytes() {
            [byte] if byte.is_ascii() && *byte != b'"' && *byte != b'\n' && *byte != b'\r' => {
                *byte
            }
            _ => {
                return Err(SettingsLoadError::Invalid {
                    path,
                    message: format!("delimiter must be one ASCII character, got {value:?}"),
                })
            }
        },
    };

    let sheet_name = raw
        .sheet_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(defaults.sheet_name);
    if sheet_name.chars().count() > 31 || sheet_name.contains(SHEET_NAME_FORBIDDEN) {
        return Err(SettingsLoadError::Invalid {
            path,
            message: format!(
                "sheet_name must be at most 31 characters without any of []:*?/\\, got {sheet_name:?}"
            ),
        });
    }

    Ok(ExportSettings {
        delimiter,
        line_terminator: raw.line_terminator.unwrap_or(defaults.line_terminator),
        sheet_name,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{
        default_settings, load_settings, parse_settings, resolve_settings, ExportSettings,
        LineTerminator, SettingsLoadError,
    };

    #[test]
    fn loads_valid_settings_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("export.toml");
        fs::write(
            &path,
            r#"
[export]
delimiter = "\t"
line_terminator = "crlf"
sheet_name = "Review"
"#,
        )
        .expect("write settings");

        let settings = load_settings(&path).expect("settings should parse");
        assert_eq!(settings.delimiter, b'\t');
        assert_eq!(settings.line_terminator, LineTerminator::Crlf);
        assert_eq!(settings.sheet_name, "Review");
    }

    #[test]
    fn missing_keys_use_defaults() {
        let settings = parse_settings("[export]\n", "inline".to_string()).expect("parse");
        assert_eq!(settings, ExportSettings::default());
    }

    #[test]
    fn rejects_multi_character_delimiter() {
        let err = parse_settings("[export]\ndelimiter = \";;\"\n", "inline".to_string())
            .expect_err("should fail");
        assert!(matches!(err, SettingsLoadError::Invalid { .. }));
    }

    #[test]
    fn rejects_sheet_names_a_workbook_cannot_hold() {
        for name in ["NAT: Summary", "A sheet name well over thirty-one chars"] {
            let raw = format!("[export]\nsheet_name = {name:?}\n");
            let err = parse_settings(&raw, "inline".to_string()).expect_err("should fail");
            assert!(matches!(err, SettingsLoadError::Invalid { .. }), "{name}");
        }
    }

    #[test]
    fn returns_parse_error_for_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").expect("write broken file");

        let err = load_settings(&path).expect_err("should fail parse");
        match err {
            SettingsLoadError::Parse { .. } => {}
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn embedded_settings_match_defaults() {
        assert_eq!(default_settings(), ExportSettings::default());
    }

    #[test]
    fn unreadable_override_falls_back_to_embedded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (settings, source) = resolve_settings(Some(&dir.path().join("missing.toml")));
        assert_eq!(source, "embedded");
        assert_eq!(settings.sheet_name, "NAT Summary");
    }
}
