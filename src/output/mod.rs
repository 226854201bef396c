//! Output formatters for scan results.
//!
//! Two renderings of the same result: a human-readable text report and a
//! machine-readable JSON document for scripting. Both consume the finder's
//! output without touching the filesystem.

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::render_report;
