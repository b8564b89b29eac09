use anyhow::{Context, Result};
use fortiparse_core::{render_tree, tokenize};

use crate::cli::InspectArgs;
use crate::input::{describe, read_text};

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let blocks =
        tokenize(&text).with_context(|| format!("failed to parse {}", describe(&args.file)))?;
    print!("{}", render_tree(&blocks, args.depth));
    Ok(())
}
