//! Line lexer generated from `lexer.pest`.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::block::BlockKind;
use crate::tokenizer::{Malformed, ParseError};

#[derive(Parser)]
#[grammar = "lexer.pest"]
struct LineParser;

/// What a line does to the block structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Blank,
    Open(BlockKind),
    Close,
    Set,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexed {
    pub kind: LineKind,
    pub tokens: Vec<String>,
}

/// Lex one line. The grammar only rejects an unclosed quote.
pub(crate) fn lex_line(text: &str, line: usize) -> Result<Lexed, ParseError> {
    let mut pairs = LineParser::parse(Rule::line, text).map_err(|_| ParseError::MalformedBlock {
        line,
        reason: Malformed::UnterminatedQuote,
    })?;

    let statement = pairs
        .next()
        .and_then(|parsed| parsed.into_inner().find(|p| p.as_rule() != Rule::EOI));
    let Some(statement) = statement else {
        return Ok(Lexed {
            kind: LineKind::Blank,
            tokens: Vec::new(),
        });
    };

    let kind = match statement.as_rule() {
        Rule::config => LineKind::Open(BlockKind::Config),
        Rule::edit => LineKind::Open(BlockKind::Edit),
        Rule::next | Rule::end => LineKind::Close,
        Rule::set => LineKind::Set,
        _ => LineKind::Other,
    };
    let tokens = statement.into_inner().map(token_text).collect();
    Ok(Lexed { kind, tokens })
}

fn token_text(pair: Pair<'_, Rule>) -> String {
    if pair.as_rule() != Rule::token {
        return pair.as_str().to_string();
    }
    let mut out = String::new();
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::quoted => {
                for inner in part.into_inner() {
                    unescape(inner.as_str(), &mut out);
                }
            }
            _ => out.push_str(part.as_str()),
        }
    }
    out
}

fn unescape(raw: &str, out: &mut String) {
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.extend(chars.next()),
            _ => out.push(ch),
        }
    }
}
