use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::block::{BlockKind, ConfigBlock, DirectiveLine};
use crate::lexer::{lex_line, LineKind};

/// Errors that abort tokenization of a configuration dump.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Structural problem in the dump. No blocks are returned.
    #[error("malformed block at line {line}: {reason}")]
    MalformedBlock { line: usize, reason: Malformed },
    /// Failed to read input file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Line number of the offending input, if the error came from the text.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedBlock { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

/// What made a block malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    /// A `"` was opened and never closed on the same line.
    #[error("unterminated quoted string")]
    UnterminatedQuote,
    /// End of input reached with this block still open.
    #[error("unterminated block '{kind} {label}'")]
    UnterminatedBlock { kind: BlockKind, label: String },
    /// `next` or `end` with nothing open.
    #[error("stray '{keyword}' with no open block")]
    StrayCloser { keyword: String },
}

/// Split one line into tokens.
///
/// Whitespace separates tokens. A `"` opens a quoted run that ends at the
/// next unescaped `"`; inside it whitespace is literal and `\` escapes the
/// following character. `""` yields an empty token.
pub fn tokenize_line(text: &str, line: usize) -> Result<Vec<String>, ParseError> {
    Ok(lex_line(text, line)?.tokens)
}

/// Tokenize a configuration dump into its top-level blocks.
///
/// `config <name>` and `edit <id>` open blocks; `next` and `end` close the
/// innermost open block. Blank lines and `#` comment lines are skipped.
/// Other lines inside a block become its directive lines. Lines outside any
/// block (CLI prompts, banners) are ignored.
pub fn tokenize(text: &str) -> Result<Vec<ConfigBlock>, ParseError> {
    let mut stack: Vec<ConfigBlock> = Vec::new();
    let mut top: Vec<ConfigBlock> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.starts_with('#') {
            continue;
        }

        let lexed = lex_line(trimmed, line)?;
        match lexed.kind {
            LineKind::Blank => {}
            LineKind::Open(kind) => {
                let label = lexed.tokens.get(1..).unwrap_or_default().join(" ");
                stack.push(ConfigBlock::new(kind, label, line, stack.len()));
            }
            LineKind::Close => {
                let block = stack.pop().ok_or_else(|| ParseError::MalformedBlock {
                    line,
                    reason: Malformed::StrayCloser {
                        keyword: lexed
                            .tokens
                            .first()
                            .map(|k| k.to_ascii_lowercase())
                            .unwrap_or_default(),
                    },
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(block),
                    None => top.push(block),
                }
            }
            LineKind::Set | LineKind::Other => match stack.last_mut() {
                Some(current) => current.directives.push(DirectiveLine {
                    line,
                    text: trimmed.to_string(),
                    tokens: lexed.tokens,
                }),
                None => tracing::debug!(line, "ignoring line outside any block"),
            },
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::MalformedBlock {
            line: open.line,
            reason: Malformed::UnterminatedBlock {
                kind: open.kind,
                label: open.label,
            },
        });
    }

    tracing::debug!(blocks = top.len(), "tokenized configuration dump");
    Ok(top)
}

/// Read and tokenize a configuration dump from disk.
pub fn tokenize_file(path: &Path) -> Result<Vec<ConfigBlock>, ParseError> {
    let text = fs::read_to_string(path)?;
    tokenize(&text)
}
