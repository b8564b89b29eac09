use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::section::Section;

/// Kind of non-fatal problem found while building records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// Identifier or a required address field is absent or blank.
    MissingRequiredField,
    /// A second rule reused an identifier already seen in this run.
    DuplicateId,
    /// A field is present but its value is outside the accepted set.
    InvalidFieldValue,
    /// VIP protocol other than tcp/udp; the rule is kept without one.
    UnsupportedProtocol,
    /// Edit blocks that cannot be routed to a known section.
    UnknownSection,
}

impl WarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::DuplicateId => "duplicate_id",
            Self::InvalidFieldValue => "invalid_field_value",
            Self::UnsupportedProtocol => "unsupported_protocol",
            Self::UnknownSection => "unknown_section",
        }
    }
}

impl Display for WarningCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem attached to one rule stanza, before section context is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub code: WarningCode,
    pub message: String,
}

impl Issue {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(
            WarningCode::MissingRequiredField,
            format!("required field '{field}' is missing or empty"),
        )
    }
}

/// Non-fatal problem returned alongside successfully built records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub code: WarningCode,
    /// Section the stanza belongs to, when it could be determined.
    pub section: Option<Section>,
    /// Edit label (rule id or VIP name) or section label.
    pub label: String,
    /// Line of the `edit` opener, when the record came from text.
    pub line: Option<usize>,
    pub message: String,
}

impl ParseWarning {
    pub fn from_issue(
        issue: Issue,
        section: Option<Section>,
        label: impl Into<String>,
        line: Option<usize>,
    ) -> Self {
        Self {
            code: issue.code,
            section,
            label: label.into(),
            line,
            message: issue.message,
        }
    }
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(section) = self.section {
            write!(f, " section={section}")?;
        }
        write!(f, " label='{}'", self.label)?;
        if let Some(line) = self.line {
            write!(f, " line={line}")?;
        }
        write!(f, ": {}", self.message)
    }
}
