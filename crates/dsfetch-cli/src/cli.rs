//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dsfetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (default: config/config.toml, skipped if absent)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Also append log lines to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the dataset archive unless it is already present
    Download(DownloadArgs),
    /// Extract a zip archive into a directory
    Extract(ExtractArgs),
    /// Download the archive, then extract it
    Run(RunArgs),
    /// Generate shell completion scripts
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Download(_) => "download",
            Self::Extract(_) => "extract",
            Self::Run(_) => "run",
            Self::Completion(_) => "completion",
        }
    }
}

/// Options shared by every command that invokes the download tool.
#[derive(clap::Args)]
pub struct FetchArgs {
    /// Shareable link or URL of the archive
    #[arg(long, value_name = "URL")]
    pub source: Option<String>,

    /// Where the archive is stored locally
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Download program to invoke (default: gdown)
    #[arg(long, value_name = "PROG")]
    pub tool: Option<String>,

    /// Do not pass --fuzzy to the download program
    #[arg(long)]
    pub no_fuzzy: bool,
}

#[derive(clap::Args)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the zip archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Output directory for the extracted files
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Skip extraction when the download fails
    #[arg(long)]
    pub abort_on_download_failure: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}
