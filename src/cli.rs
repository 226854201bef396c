//! Command-line interface definitions for dupescan.
//!
//! Single-purpose CLI: scan one directory for byte-identical files and
//! report (or, with `--force`, delete) the duplicates found.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates in a media folder
//! dupescan ~/WhatsApp/Media
//!
//! # Recursive scan with JSON output for scripting
//! dupescan -r ~/Downloads --output json
//!
//! # Delete duplicates, keeping the shortest-named file of each group
//! dupescan -r -f ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::scanner::DEFAULT_CHUNK_SIZE;

/// Duplicate file finder using progressive size, prefix-hash, and
/// full-hash narrowing.
///
/// By default nothing is deleted; duplicates are only reported. With
/// `--force`, every group is reduced to one file, preserving the member
/// with the shortest filename (ties broken alphabetically).
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Chunk size in bytes for the prefix-hash heuristic
    ///
    /// Smaller values are generally faster, but if many files share
    /// identical starting chunks more full hashes must be computed.
    #[arg(short, long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Recursively scan subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Delete duplicates without prompting, keeping one file per group
    #[arg(short, long)]
    pub force: bool,

    /// Number of I/O threads for hashing (lower values reduce disk
    /// thrashing on HDDs)
    #[arg(long, value_name = "N", default_value = "4")]
    pub io_threads: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Report rendering for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable JSON for scripting
    Json,
}
