//! CLI argument definitions using clap
//!
//! Commands:
//! - forecast-arc compress --archive <path> --root <id> [--config <path>] [--output <path>]
//! - forecast-arc trace --archive <path> --root <id>
//! - forecast-arc roots --archive <path>
//! - forecast-arc compress-all --archive <path> --output-dir <dir> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// forecast-arc - collapse forecast revision histories into one canonical forecast
#[derive(Parser, Debug)]
#[command(name = "forecast-arc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress the episode chain rooted at one trace id
    Compress {
        /// Line-delimited JSON archive of forecast records
        #[arg(long)]
        archive: PathBuf,

        /// Root trace id
        #[arg(long)]
        root: String,

        /// Compression config (JSON); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the ordered episode chain for a root without compressing
    Trace {
        #[arg(long)]
        archive: PathBuf,

        #[arg(long)]
        root: String,
    },

    /// List origin trace ids (records without a parent)
    Roots {
        #[arg(long)]
        archive: PathBuf,
    },

    /// Compress every origin root into its own file
    CompressAll {
        #[arg(long)]
        archive: PathBuf,

        /// Directory receiving one <root>.forecast.json per origin
        #[arg(long)]
        output_dir: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
