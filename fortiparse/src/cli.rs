use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "fortiparse")]
#[command(about = "Parse FortiGate configuration dumps and export NAT summaries")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Show the config/edit block tree of a dump.
    Inspect(InspectArgs),
    /// Parse `config firewall policy` rules.
    ParsePolicies(ParseArgs),
    /// Parse central SNAT and VIP rules.
    ParseNat(ParseArgs),
    /// Build the NAT summary export.
    Export(ExportArgs),
    /// Validate a save payload and print an acknowledgement.
    Save(SaveArgs),
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Dump file, or `-` for stdin.
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Dump file, or `-` for stdin.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Where the parse results of one session are kept between invocations.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// JSON file holding the session store.
    #[arg(long, requires = "session_id")]
    pub session: Option<PathBuf>,
    /// Session to read from or write to.
    #[arg(long, requires = "session")]
    pub session_id: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// JSON payload `{ "csnat": [...], "vip": [...] }`, or `-` for stdin.
    #[arg(long, conflicts_with = "nat")]
    pub payload: Option<PathBuf>,
    /// Raw NAT dump, or `-` for stdin.
    #[arg(long)]
    pub nat: Option<PathBuf>,
    #[command(flatten)]
    pub session: SessionArgs,
    /// Destination file, or `-` for stdout. Defaults to the export filename.
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ExportFormatArg::Xlsx)]
    pub format: ExportFormatArg,
    /// Export settings TOML. Defaults to the embedded settings.
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Payload file, or `-` for stdin.
    pub file: PathBuf,
    #[arg(long, value_enum)]
    pub kind: SaveKind,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormatArg {
    Xlsx,
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SaveKind {
    Policies,
    Nat,
}
