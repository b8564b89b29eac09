//! Shared plumbing for the section-specific record builders.
//!
//! Each builder maps an edit label plus its [`DirectiveMap`] to a
//! [`BuildOutcome`]. Builders never fail: stanzas that cannot become a
//! record are either skipped silently (disabled) or dropped with an
//! [`Issue`] that the caller turns into a warning.

use std::collections::BTreeSet;

use fortiparse_core::DirectiveMap;

use crate::section::Section;
use crate::warning::{Issue, ParseWarning, WarningCode};

/// Result of building one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome<T> {
    /// Record built. `issues` are kept as warnings but do not drop it.
    Built { record: T, issues: Vec<Issue> },
    /// Stanza is administratively disabled; no record, no warning.
    Disabled,
    /// Stanza is incomplete or invalid; excluded with a warning.
    Dropped(Issue),
}

impl<T> BuildOutcome<T> {
    pub fn built(record: T) -> Self {
        Self::Built {
            record,
            issues: Vec::new(),
        }
    }
}

/// A typed record produced from one `edit` stanza.
pub trait RuleRecord: Sized {
    /// Section the record belongs to.
    const SECTION: Section;

    /// Build from an edit label and its directives.
    fn build(label: &str, directives: &DirectiveMap) -> BuildOutcome<Self>;

    /// Identifier that must be unique within one run.
    fn key(&self) -> &str;
}

/// One stanza waiting to be built: label, opener line, directives.
#[derive(Debug, Clone)]
pub struct Stanza {
    pub label: String,
    pub line: Option<usize>,
    pub directives: DirectiveMap,
}

/// Records plus everything that did not make it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collected<T> {
    pub records: Vec<T>,
    pub warnings: Vec<ParseWarning>,
    pub skipped: usize,
}

impl<T> Default for Collected<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            warnings: Vec::new(),
            skipped: 0,
        }
    }
}

/// What happens to a record whose key was already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateIds {
    /// Keep the first, drop later ones with a `duplicate_id` warning.
    Reject,
    /// Keep every record. Payload rows carry no identity of their own.
    Keep,
}

/// Build every stanza in order, dropping duplicates and incomplete records.
pub fn collect_records<R: RuleRecord>(stanzas: impl IntoIterator<Item = Stanza>) -> Collected<R> {
    collect_records_with(stanzas, DuplicateIds::Reject)
}

pub fn collect_records_with<R: RuleRecord>(
    stanzas: impl IntoIterator<Item = Stanza>,
    duplicates: DuplicateIds,
) -> Collected<R> {
    let mut out = Collected::default();
    let mut seen = BTreeSet::new();

    for stanza in stanzas {
        let section = Some(R::SECTION);
        match R::build(&stanza.label, &stanza.directives) {
            BuildOutcome::Built { record, issues } => {
                for issue in issues {
                    out.warnings.push(ParseWarning::from_issue(
                        issue,
                        section,
                        &stanza.label,
                        stanza.line,
                    ));
                }
                if duplicates == DuplicateIds::Reject && !seen.insert(record.key().to_string()) {
                    tracing::warn!(section = %R::SECTION, label = %stanza.label, "dropping duplicate rule id");
                    out.warnings.push(ParseWarning::from_issue(
                        Issue::new(
                            WarningCode::DuplicateId,
                            format!("id '{}' already used earlier in this input", record.key()),
                        ),
                        section,
                        &stanza.label,
                        stanza.line,
                    ));
                    continue;
                }
                out.records.push(record);
            }
            BuildOutcome::Disabled => {
                tracing::debug!(section = %R::SECTION, label = %stanza.label, "skipping disabled stanza");
                out.skipped += 1;
            }
            BuildOutcome::Dropped(issue) => {
                tracing::warn!(
                    section = %R::SECTION,
                    label = %stanza.label,
                    code = %issue.code,
                    "dropping rule: {}",
                    issue.message
                );
                out.warnings.push(ParseWarning::from_issue(
                    issue,
                    section,
                    &stanza.label,
                    stanza.line,
                ));
            }
        }
    }

    out
}

/// True for `set status disable`.
pub(crate) fn is_disabled(directives: &DirectiveMap) -> bool {
    directives
        .get("status")
        .and_then(|v| v.as_scalar())
        .is_some_and(|s| s.trim().eq_ignore_ascii_case("disable"))
}

/// Ordered, trimmed, non-empty names under the first present key.
pub(crate) fn names(directives: &DirectiveMap, keys: &[&str]) -> Vec<String> {
    directives
        .get_any(keys)
        .map(|value| {
            value
                .values()
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Single text value under the first present key; lists are comma-joined.
pub(crate) fn text(directives: &DirectiveMap, keys: &[&str]) -> Option<String> {
    let joined = names(directives, keys).join(",");
    (!joined.is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use fortiparse_core::{DirectiveMap, DirectiveValue};

    use super::{is_disabled, names, text};

    #[test]
    fn names_trim_and_skip_blank_entries() {
        let mut map = DirectiveMap::new();
        map.insert(
            "srcaddr",
            DirectiveValue::List(vec![" LAN ".into(), String::new(), "DMZ".into()]),
        );
        assert_eq!(names(&map, &["srcaddr"]), vec!["LAN", "DMZ"]);
        assert_eq!(text(&map, &["missing", "srcaddr"]), Some("LAN,DMZ".to_string()));
        assert_eq!(text(&map, &["missing"]), None);
    }

    #[test]
    fn status_disable_is_case_insensitive() {
        let mut map = DirectiveMap::new();
        map.insert("status", DirectiveValue::Scalar("Disable".into()));
        assert!(is_disabled(&map));
        map.insert("status", DirectiveValue::Scalar("enable".into()));
        assert!(!is_disabled(&map));
    }
}
