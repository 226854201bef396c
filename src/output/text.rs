//! Human-readable text report for scan results.

use std::fmt::Write as _;

use bytesize::ByteSize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Render the duplicate groups and scan summary as a text report.
#[must_use]
pub fn render_report(groups: &[DuplicateGroup], summary: &ScanSummary) -> String {
    let mut out = String::new();

    for group in groups {
        let _ = writeln!(
            out,
            "{} ({} x {})",
            group.hash_hex(),
            group.duplicate_count() + 1,
            ByteSize(group.size)
        );
        let _ = writeln!(out, "  {}", group.canonical.display());
        for dup in &group.duplicates {
            let _ = writeln!(out, "  {}", dup.display());
        }
        let _ = writeln!(out, "  keep: {}", group.keep_file().display());
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "Scanned {} files ({}) in {:.2?}",
        summary.total_files,
        ByteSize(summary.total_size),
        summary.scan_duration
    );
    let _ = writeln!(
        out,
        "{} duplicate groups, {} duplicate files, {} reclaimable ({:.1}%)",
        summary.duplicate_groups,
        summary.duplicate_files,
        ByteSize(summary.reclaimable_space),
        summary.wasted_percentage()
    );

    let skipped = summary.scan_errors.len() + summary.hash_failures;
    if skipped > 0 {
        let _ = writeln!(out, "{skipped} files skipped due to errors");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_report_lists_groups_and_summary() {
        let group = DuplicateGroup::from_members(
            [1u8; 32],
            1024,
            vec![PathBuf::from("/x/b.txt"), PathBuf::from("/x/a.txt")],
        )
        .unwrap();
        let summary = ScanSummary {
            total_files: 5,
            total_size: 4096,
            duplicate_groups: 1,
            duplicate_files: 1,
            reclaimable_space: 1024,
            ..Default::default()
        };

        let report = render_report(&[group], &summary);

        assert!(report.contains("/x/a.txt"));
        assert!(report.contains("/x/b.txt"));
        assert!(report.contains("keep: /x/a.txt"));
        assert!(report.contains("1 duplicate groups"));
        assert!(!report.contains("skipped"));
    }

    #[test]
    fn test_report_mentions_skipped_files() {
        let summary = ScanSummary {
            hash_failures: 2,
            ..Default::default()
        };
        let report = render_report(&[], &summary);
        assert!(report.contains("2 files skipped"));
    }
}
