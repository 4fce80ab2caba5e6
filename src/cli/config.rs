// CLI configuration
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tune_transporter::slskd::SLSKD_EVENT_ENV_VAR;

use super::output::OutputFormat;

/// Environment variable holding the music library root
pub const MUSIC_DIR_ENV_VAR: &str = "TUNE_TRANSPORTER_MUSIC_PATH";

/// Environment variable holding the directory slskd downloads into
pub const DOWNLOADS_DIR_ENV_VAR: &str = "TUNE_TRANSPORTER_DOWNLOADS_PATH";

/// Audio files picked up from a download directory by default
pub const DEFAULT_PATTERN: &str = "*.flac";

/// tune-transporter - file FLAC downloads into a music library
#[derive(Parser, Debug)]
#[command(name = "tune-transporter")]
#[command(about = "Moves FLAC files into <library>/<album artist>/<album>/ using their tags", long_about = None)]
#[command(version)]
pub struct Config {
    /// Music library root
    #[arg(long, value_name = "DIR", env = MUSIC_DIR_ENV_VAR, global = true)]
    pub music_dir: Option<PathBuf>,

    /// Directory holding one subdirectory per download
    #[arg(long, value_name = "DIR", env = DOWNLOADS_DIR_ENV_VAR, global = true)]
    pub downloads_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (only warnings and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (show scanning details)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Show where files would go without moving anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Subcommand; `select` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tags of FLAC file(s)
    Read {
        /// FLAC file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// File a single FLAC file into the library
    File {
        /// FLAC file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// File the directory named by an slskd download event
    Event {
        /// Event JSON
        #[arg(long, env = SLSKD_EVENT_ENV_VAR, hide_env_values = true)]
        json: String,

        #[command(flatten)]
        batch: BatchOptions,
    },

    /// Pick a download directory from a list and file it
    Select {
        #[command(flatten)]
        batch: BatchOptions,
    },

    /// File every matching file of a directory
    Batch {
        /// Directory path
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        #[command(flatten)]
        batch: BatchOptions,
    },
}

/// Options shared by directory based commands
#[derive(clap::Args, Debug, Clone)]
pub struct BatchOptions {
    /// File pattern inside the directory
    #[arg(short, long, default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Delete the directory after every file was moved
    #[arg(long)]
    pub cleanup: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            cleanup: false,
        }
    }
}

impl Config {
    /// Default log filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
