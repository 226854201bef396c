//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "hash": "abc123...",
//!       "size": 1024,
//!       "canonical": "/path/to/a.txt",
//!       "duplicates": ["/path/to/b.txt"],
//!       "keep": "/path/to/a.txt"
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "reclaimable_space": 51200,
//!     "scan_duration_ms": 1234,
//!     "scan_errors": 0
//!   }
//! }
//! ```

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// File size in bytes
    pub size: u64,
    /// Canonical (representative) path
    pub canonical: String,
    /// Paths identical in content to the canonical
    pub duplicates: Vec<String>,
    /// The member the keep-selection heuristic would preserve
    pub keep: String,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a [`DuplicateGroup`].
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash_hex(),
            size: group.size,
            canonical: group.canonical.to_string_lossy().into_owned(),
            duplicates: group
                .duplicates
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            keep: group.keep_file().to_string_lossy().into_owned(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Total number of candidate files enumerated
    pub total_files: usize,
    /// Total size of all enumerated files in bytes
    pub total_size: u64,
    /// Files that were prefix-hashed
    pub prefix_hashed: usize,
    /// Files that were hashed in full
    pub full_hashed: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding canonicals)
    pub duplicate_files: usize,
    /// Space reclaimable by removing duplicates (bytes)
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// Number of files skipped due to per-file errors
    pub scan_errors: usize,
}

/// Complete JSON document: groups plus summary.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Confirmed duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Assemble the JSON document from finder output.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary) -> Self {
        Self {
            duplicates: groups
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            summary: JsonSummary {
                total_files: summary.total_files,
                total_size: summary.total_size,
                prefix_hashed: summary.prefix_hashed,
                full_hashed: summary.full_hashed,
                duplicate_groups: summary.duplicate_groups,
                duplicate_files: summary.duplicate_files,
                reclaimable_space: summary.reclaimable_space,
                scan_duration_ms: summary.scan_duration.as_millis() as u64,
                scan_errors: summary.scan_errors.len() + summary.hash_failures,
            },
        }
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_group() -> DuplicateGroup {
        DuplicateGroup::from_members(
            [7u8; 32],
            128,
            vec![
                PathBuf::from("/data/bbbb.txt"),
                PathBuf::from("/data/aa.txt"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_json_group_shape() {
        let json = JsonDuplicateGroup::from_duplicate_group(&sample_group());

        assert_eq!(json.size, 128);
        assert_eq!(json.hash.len(), 64);
        assert_eq!(json.canonical, "/data/aa.txt");
        assert_eq!(json.duplicates, vec!["/data/bbbb.txt".to_string()]);
        // Shortest stem wins the keep selection
        assert_eq!(json.keep, "/data/aa.txt");
    }

    #[test]
    fn test_output_round_trips_through_serde() {
        let summary = ScanSummary {
            total_files: 2,
            total_size: 256,
            duplicate_groups: 1,
            duplicate_files: 1,
            reclaimable_space: 128,
            ..Default::default()
        };
        let output = JsonOutput::new(&[sample_group()], &summary);
        let text = output.to_json_pretty().unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["summary"]["total_files"], 2);
        assert_eq!(value["summary"]["reclaimable_space"], 128);
        assert_eq!(value["duplicates"][0]["canonical"], "/data/aa.txt");
    }
}
