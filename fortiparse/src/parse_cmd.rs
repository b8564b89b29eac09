use anyhow::{Context, Result};
use fortiparse::report::{render_nat, render_parse_summary, render_policies, render_warnings};
use fortiparse::section::{parse_nat, parse_policies};

use crate::cli::{OutputFormat, ParseArgs};
use crate::input::{describe, read_text};
use crate::session_file::update_session;

pub fn run_parse_policies(args: ParseArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let outcome = parse_policies(&text)
        .with_context(|| format!("failed to parse {}", describe(&args.file)))?;

    if let Some((path, id)) = args.session.target() {
        let policies = outcome.records.clone();
        update_session(path, |store| store.store_policies(&id, policies))?;
    }

    match args.format {
        OutputFormat::Text => {
            if !outcome.records.is_empty() {
                println!("{}", render_policies(&outcome.records));
            }
            if !outcome.warnings.is_empty() {
                println!("{}", render_warnings(&outcome.warnings));
            }
            println!(
                "{}",
                render_parse_summary(
                    outcome.records.len(),
                    outcome.warnings.len(),
                    outcome.skipped
                )
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(())
}

pub fn run_parse_nat(args: ParseArgs) -> Result<()> {
    let text = read_text(&args.file)?;
    let nat = parse_nat(&text)
        .with_context(|| format!("failed to parse {}", describe(&args.file)))?;

    if let Some((path, id)) = args.session.target() {
        update_session(path, |store| store.store_nat(&id, &nat))?;
    }

    match args.format {
        OutputFormat::Text => {
            println!("{}", render_nat(&nat.csnat, &nat.vip));
            if !nat.warnings.is_empty() {
                println!("{}", render_warnings(&nat.warnings));
            }
            println!(
                "{}",
                render_parse_summary(
                    nat.csnat.len() + nat.vip.len(),
                    nat.warnings.len(),
                    nat.skipped
                )
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nat)?),
    }

    Ok(())
}
