use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod export_cmd;
mod input;
mod inspect_cmd;
mod parse_cmd;
mod path_guard;
mod save_cmd;
mod session_file;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Inspect(args) => inspect_cmd::run_inspect(args),
        Command::ParsePolicies(args) => parse_cmd::run_parse_policies(args),
        Command::ParseNat(args) => parse_cmd::run_parse_nat(args),
        Command::Export(args) => export_cmd::run_export(args),
        Command::Save(args) => save_cmd::run_save(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
