use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docvault", bin_name = "docvault", version)]
#[command(about = "Local document vault for a five-day training curriculum", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Selected training day (seg, ter, qua, qui, sex)
    #[arg(short, long, global = true, default_value = "seg", help_heading = "Options")]
    pub day: String,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Folder that receives downloads (defaults to the download-dir setting, then the current directory)
    #[arg(short, long, global = true, value_name = "DIR", help_heading = "Options")]
    pub out: Option<PathBuf>,

    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "DOCVAULT_HOME", value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show days, the selected day's files and storage usage
    #[command(display_order = 1)]
    View,

    /// Show the training days with their document counts
    #[command(display_order = 2)]
    Days,

    /// List the selected day's files
    #[command(alias = "ls", display_order = 3)]
    Files,

    /// Show storage usage
    #[command(display_order = 4)]
    Summary,

    /// Upload files into the selected day
    #[command(alias = "up", display_order = 10)]
    Upload {
        /// Files to upload
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Download a file of the selected day
    #[command(alias = "o", display_order = 11)]
    Open {
        /// Position in the day's list (e.g. 1) or id of a file in that day
        file: String,
    },

    /// Download a day's main material
    #[command(display_order = 12)]
    OpenDay {
        /// Day id (seg, ter, qua, qui, sex)
        day_id: String,
    },

    /// Remove a file of the selected day
    #[command(alias = "rm", display_order = 13)]
    Remove {
        /// Position in the day's list (e.g. 1) or id of a file in that day
        file: String,
    },

    /// Check and fix inconsistencies between the index and stored content
    #[command(display_order = 30)]
    Doctor,

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        /// Configuration key (quota-mb, enforce-quota, download-dir, timestamp-format)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
