use std::collections::BTreeMap;

use serde::Serialize;

use crate::block::{ConfigBlock, DirectiveLine};

/// Value of one `set` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DirectiveValue {
    /// Exactly one value token.
    Scalar(String),
    /// Zero or several value tokens, in source order.
    List(Vec<String>),
}

impl DirectiveValue {
    fn from_tokens(mut tokens: Vec<String>) -> Self {
        if tokens.len() == 1 {
            Self::Scalar(tokens.remove(0))
        } else {
            Self::List(tokens)
        }
    }

    /// All value tokens as a slice, scalar or not.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        }
    }

    /// The value when it is a single token.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::List(_) => None,
        }
    }

    /// True when no token carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(|v| v.trim().is_empty())
    }
}

/// `set` directives of one block keyed by lower-cased directive name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectiveMap {
    entries: BTreeMap<String, DirectiveValue>,
}

impl DirectiveMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl AsRef<str>, value: DirectiveValue) {
        self.entries
            .insert(key.as_ref().to_ascii_lowercase(), value);
    }

    /// Look up a directive by name (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&DirectiveValue> {
        self.entries.get(&key.to_ascii_lowercase())
    }

    /// Look up the first present key among `keys`.
    pub fn get_any(&self, keys: &[&str]) -> Option<&DirectiveValue> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Extract the `set` directives of a block.
pub fn extract(block: &ConfigBlock) -> DirectiveMap {
    extract_lines(&block.directives)
}

/// Extract `set <key> <value...>` directives from tokenized lines.
///
/// Keys are lower-cased. One value token becomes a scalar, anything else a
/// list. Later occurrences of a key win. Lines that are not `set` lines are
/// ignored.
pub fn extract_lines(lines: &[DirectiveLine]) -> DirectiveMap {
    let mut map = DirectiveMap::new();
    for line in lines {
        let mut tokens = line.tokens.iter();
        match tokens.next() {
            Some(verb) if verb.eq_ignore_ascii_case("set") => {}
            _ => continue,
        }
        let Some(key) = tokens.next() else {
            tracing::debug!(line = line.line, "ignoring 'set' without a key");
            continue;
        };
        map.insert(key, DirectiveValue::from_tokens(tokens.cloned().collect()));
    }
    map
}
