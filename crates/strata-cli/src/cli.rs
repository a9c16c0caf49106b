use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use strata_types::ChangeType;

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Reconcile a local directory with its data-lake remote",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ./.strata.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List files under a directory in remote listing order
    Walk(WalkArgs),
    /// Show local changes relative to a remote listing
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct WalkArgs {
    #[arg(default_value = ".")]
    pub root: PathBuf,
    /// Include names the config would otherwise ignore
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    #[arg(default_value = ".")]
    pub root: PathBuf,
    /// Remote listing exported as a JSON array of object stats
    #[arg(long)]
    pub remote: PathBuf,
    /// Only diff remote objects under this prefix
    #[arg(long)]
    pub prefix: Option<String>,
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Only report these change types (added, removed, modified)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<ChangeType>,
    /// Exit with status 1 when there are changes
    #[arg(long)]
    pub exit_code: bool,
}
