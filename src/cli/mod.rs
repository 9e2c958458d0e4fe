//! Command-line interface for proofstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod context;

/// proofstore - verifiable file storage
#[derive(Parser)]
#[command(
    name = "proofstore",
    version,
    about = "Upload a directory, fetch any single file back with a merkle inclusion proof",
    long_about = "proofstore keeps uploaded file sets under an opaque key, remembers the merkle root of every upload locally, and only accepts a downloaded file when its inclusion proof recomputes that root."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding stored file sets
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding locally recorded merkle roots
    #[arg(long, global = true)]
    pub roots_dir: Option<PathBuf>,

    /// Directory verified downloads are written to
    #[arg(long, global = true)]
    pub downloads_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload every file in a directory and record its merkle root
    Upload {
        /// Directory to upload
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download a file by key and index, verifying its inclusion proof
    Get {
        /// Store key returned by upload
        key: String,

        /// Position of the file in name order
        index: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an inclusion proof for a stored file
    Prove {
        /// Store key returned by upload
        key: String,

        /// Position of the file in name order
        index: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify an inclusion proof document
    Verify {
        /// Path to the proof JSON
        proof: PathBuf,

        /// File whose contents must match the proven leaf
        #[arg(long)]
        file: Option<PathBuf>,

        /// Root hash to verify against (default: locally recorded root)
        #[arg(long)]
        root: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show locally recorded merkle roots
    Root {
        /// Only show the root for this key
        key: Option<String>,
    },

    /// Upload a directory, then download and verify every file in it
    Demo {
        /// Directory to upload
        dir: PathBuf,
    },

    /// Show or initialize the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
