//! Deletion collaborator: keep-selection and forced removal.

use dupescan::actions::delete_duplicates;
use dupescan::duplicates::{DuplicateFinder, FinderConfig};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

#[test]
fn test_scan_alone_never_mutates() {
    let dir = tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", b"same");
    let b = write_file(dir.path(), "b.txt", b"same");

    let finder = DuplicateFinder::new(FinderConfig::default().with_recursive(true));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert!(a.exists());
    assert!(b.exists());
}

#[test]
fn test_force_delete_keeps_shortest_name() {
    let dir = tempdir().unwrap();
    let short = write_file(dir.path(), "img.jpg", b"bytes");
    let long1 = write_file(dir.path(), "img-copy.jpg", b"bytes");
    let long2 = write_file(dir.path(), "img-copy (2).jpg", b"bytes");

    let finder = DuplicateFinder::new(FinderConfig::default().with_recursive(true));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();
    let result = delete_duplicates(&groups);

    assert!(result.all_succeeded());
    assert!(short.exists());
    assert!(!long1.exists());
    assert!(!long2.exists());
    assert_eq!(result.bytes_freed, 10);
}

#[test]
fn test_force_delete_alphabetical_tiebreak() {
    let dir = tempdir().unwrap();
    let bbb = write_file(dir.path(), "bbb.txt", b"dup");
    let aaa = write_file(dir.path(), "aaa.txt", b"dup");

    let finder = DuplicateFinder::new(FinderConfig::default().with_recursive(true));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();
    let result = delete_duplicates(&groups);

    assert!(aaa.exists());
    assert!(!bbb.exists());
    assert_eq!(result.kept.len(), 1);
    assert_eq!(result.deleted.len(), 1);
}

#[test]
fn test_each_group_keeps_exactly_one() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        let content = format!("group payload {i}");
        write_file(dir.path(), &format!("g{i}-first.txt"), content.as_bytes());
        write_file(dir.path(), &format!("g{i}-second.txt"), content.as_bytes());
        write_file(dir.path(), &format!("g{i}-third.txt"), content.as_bytes());
    }

    let finder = DuplicateFinder::new(FinderConfig::default().with_recursive(true));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();
    assert_eq!(groups.len(), 5);

    let result = delete_duplicates(&groups);

    assert!(result.all_succeeded());
    assert_eq!(result.kept.len(), 5);
    assert_eq!(result.deleted.len(), 10);

    // Rescanning the survivors finds nothing left to deduplicate
    let (after, _) = finder.find_duplicates(dir.path()).unwrap();
    assert!(after.is_empty());
}
