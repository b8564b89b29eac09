use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Which opener started a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// `config <section>` ... `end`
    Config,
    /// `edit <id>` ... `next`
    Edit,
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Edit => write!(f, "edit"),
        }
    }
}

/// One non-structural line found inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveLine {
    /// 1-based line number in the source text.
    pub line: usize,
    /// Trimmed source text, verbatim.
    pub text: String,
    /// Whitespace-separated tokens with quoted runs kept whole and unquoted.
    pub tokens: Vec<String>,
}

/// A `config` or `edit` block with its directive lines and nested blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigBlock {
    pub kind: BlockKind,
    /// Section name for `config`, rule id for `edit`. May be empty.
    pub label: String,
    /// Line of the opener.
    pub line: usize,
    /// Nesting depth; top-level blocks are 0.
    pub depth: usize,
    pub directives: Vec<DirectiveLine>,
    pub children: Vec<ConfigBlock>,
}

impl ConfigBlock {
    /// Create an empty block.
    pub fn new(kind: BlockKind, label: impl Into<String>, line: usize, depth: usize) -> Self {
        Self {
            kind,
            label: label.into(),
            line,
            depth,
            directives: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Return child `edit` blocks in source order.
    pub fn edits(&self) -> impl Iterator<Item = &ConfigBlock> {
        self.children.iter().filter(|c| c.kind == BlockKind::Edit)
    }

    /// Return the first nested `config` block with the provided label.
    pub fn get_config(&self, label: &str) -> Option<&ConfigBlock> {
        self.children
            .iter()
            .find(|c| c.kind == BlockKind::Config && c.label == label)
    }
}

/// Render a block forest with a configurable max depth.
pub fn render_tree(blocks: &[ConfigBlock], max_depth: usize) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(block, max_depth, &mut out);
    }
    out
}

fn render_block(block: &ConfigBlock, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(block.depth);
    out.push_str(&format!(
        "{indent}{} {} (line {}, {} directives)\n",
        block.kind,
        block.label,
        block.line,
        block.directives.len()
    ));

    if block.depth >= max_depth {
        return;
    }

    for child in &block.children {
        render_block(child, max_depth, out);
    }
}

#[cfg(test)]
mod tests {
    use super::{render_tree, BlockKind, ConfigBlock};

    #[test]
    fn render_tree_stops_at_depth() {
        let mut root = ConfigBlock::new(BlockKind::Config, "firewall vip", 1, 0);
        let mut edit = ConfigBlock::new(BlockKind::Edit, "web", 2, 1);
        edit.children
            .push(ConfigBlock::new(BlockKind::Config, "realservers", 3, 2));
        root.children.push(edit);

        let shallow = render_tree(std::slice::from_ref(&root), 1);
        assert!(shallow.contains("  edit web (line 2, 0 directives)"));
        assert!(!shallow.contains("realservers"));

        let deep = render_tree(&[root], 5);
        assert!(deep.contains("    config realservers"));
    }
}
