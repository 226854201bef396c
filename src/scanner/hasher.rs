//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! Provides the [`Hasher`] struct for computing BLAKE3 digests of file
//! contents. Two operations back the progressive detection pipeline:
//!
//! - [`Hasher::prefix_hash`]: digest of only the first `chunk_size` bytes,
//!   used as a cheap pre-filter before paying for full reads
//! - [`Hasher::full_hash`]: digest of the entire file content, streamed
//!   in `chunk_size` reads so memory stays bounded
//!
//! Every file handle is opened, read, and dropped inside a single call;
//! no handle outlives its hashing operation.

use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// A 256-bit BLAKE3 content digest.
pub type Hash = [u8; 32];

/// Default number of bytes hashed by the prefix pre-filter.
///
/// Smaller values speed up prefix hashing but raise the odds of prefix
/// collisions that force a full-hash fallback. This is a performance
/// trade-off only, never a correctness one.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// BLAKE3 file hasher.
///
/// `chunk_size` controls both the prefix length and the read granularity
/// used when streaming full files.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Hasher {
    /// Create a hasher with the given chunk size (in bytes, minimum 1).
    #[must_use]
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// The configured chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash only the first `chunk_size` bytes of a file.
    ///
    /// Files shorter than `chunk_size` are hashed in full; reading past
    /// EOF simply yields the whole short file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn prefix_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
        let mut reader = file.take(self.chunk_size as u64);

        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; self.chunk_size.min(64 * 1024)];
        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }

    /// Hash the entire content of a file, streaming in `chunk_size` reads.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path.to_path_buf(), e))?;

        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; self.chunk_size.min(64 * 1024)];
        loop {
            let n = file
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Format a hash digest as a lowercase hexadecimal string.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut hex = String::with_capacity(64);
    for byte in hash {
        // write! to a String cannot fail
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap().write_all(content).unwrap();
        path
    }

    #[test]
    fn test_full_hash_matches_blake3() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "a.bin", b"hello world");

        let hasher = Hasher::new(4);
        let hash = hasher.full_hash(&path).unwrap();

        assert_eq!(hash, *blake3::hash(b"hello world").as_bytes());
    }

    #[test]
    fn test_prefix_hash_reads_only_chunk() {
        let dir = tempdir().unwrap();
        let a = write_file(dir.path(), "a.bin", b"aaaa1111");
        let b = write_file(dir.path(), "b.bin", b"aaaa2222");

        let hasher = Hasher::new(4);
        // Same first 4 bytes, so the prefix digests must collide
        assert_eq!(hasher.prefix_hash(&a).unwrap(), hasher.prefix_hash(&b).unwrap());
        // ...while the full digests must not
        assert_ne!(hasher.full_hash(&a).unwrap(), hasher.full_hash(&b).unwrap());
    }

    #[test]
    fn test_prefix_hash_short_file_is_full_content() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "short.bin", b"ab");

        let hasher = Hasher::new(1024);
        assert_eq!(
            hasher.prefix_hash(&path).unwrap(),
            *blake3::hash(b"ab").as_bytes()
        );
    }

    #[test]
    fn test_empty_file_hashes() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "empty.bin", b"");

        let hasher = Hasher::default();
        let expected = *blake3::hash(b"").as_bytes();
        assert_eq!(hasher.prefix_hash(&path).unwrap(), expected);
        assert_eq!(hasher.full_hash(&path).unwrap(), expected);
    }

    #[test]
    fn test_full_hash_spans_multiple_chunks() {
        let dir = tempdir().unwrap();
        let content = vec![0x5au8; 10_000];
        let path = write_file(dir.path(), "big.bin", &content);

        let hasher = Hasher::new(1024);
        assert_eq!(
            hasher.full_hash(&path).unwrap(),
            *blake3::hash(&content).as_bytes()
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let hasher = Hasher::default();
        let err = hasher.full_hash(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, HashError::NotFound(_)));
    }

    #[test]
    fn test_hash_to_hex() {
        let mut hash = [0u8; 32];
        hash[0] = 0xab;
        hash[1] = 0xcd;
        hash[31] = 0xef;

        let hex = hash_to_hex(&hash);
        assert!(hex.starts_with("abcd"));
        assert!(hex.ends_with("ef"));
        assert_eq!(hex.len(), 64);
    }

    #[test]
    fn test_chunk_size_floor() {
        let hasher = Hasher::new(0);
        assert_eq!(hasher.chunk_size(), 1);
    }
}
