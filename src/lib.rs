//! dupescan - Progressive duplicate file detector
//!
//! Finds byte-identical files within a directory tree without hashing every
//! file fully up front. Candidates are narrowed in three tiers: exact size,
//! then a BLAKE3 hash of the first `chunk_size` bytes, then a full-content
//! hash. The detection core never mutates the filesystem; deletion is a
//! separate, explicitly forced action.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use cli::{Cli, OutputFormat};
use duplicates::{DuplicateFinder, FinderConfig};
use error::ExitCode;

/// Run the application logic for the parsed CLI arguments.
///
/// Scans, prints the report in the requested format, and (with `--force`)
/// deletes duplicates while preserving one keep-file per group.
///
/// # Errors
///
/// Returns an error for invalid input paths or report serialization
/// failures. Per-file scan errors are reflected in the exit code instead.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = FinderConfig::default()
        .with_chunk_size(cli.chunk_size)
        .with_recursive(cli.recursive)
        .with_io_threads(cli.io_threads);
    let finder = DuplicateFinder::new(config);

    let (groups, summary) = finder.find_duplicates(&cli.path)?;

    match cli.output {
        OutputFormat::Text => print!("{}", output::render_report(&groups, &summary)),
        OutputFormat::Json => {
            let doc = output::JsonOutput::new(&groups, &summary);
            println!("{}", doc.to_json_pretty()?);
        }
    }

    let mut delete_failed = false;
    if cli.force && !groups.is_empty() {
        let result = actions::delete_duplicates(&groups);
        delete_failed = !result.all_succeeded();
    }

    Ok(if groups.is_empty() {
        ExitCode::NoDuplicates
    } else if summary.has_errors() || delete_failed {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    })
}
