//! Section-independent parsing primitives for FortiOS-style configuration dumps.
//!
//! A dump is a forest of `config <section>` / `edit <id>` blocks closed by
//! `end` / `next`. [`tokenize`] turns text into [`ConfigBlock`]s and
//! [`extract`] turns one block's `set` lines into a [`DirectiveMap`].
//! Nothing here knows what a policy or a NAT rule is.

pub mod block;
pub mod directive;
mod lexer;
pub mod tokenizer;

pub use block::{render_tree, BlockKind, ConfigBlock, DirectiveLine};
pub use directive::{extract, extract_lines, DirectiveMap, DirectiveValue};
pub use tokenizer::{tokenize, tokenize_file, tokenize_line, Malformed, ParseError};
