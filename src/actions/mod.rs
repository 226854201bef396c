//! File actions module.
//!
//! The detection core never mutates the filesystem; this module is the
//! external collaborator that consumes its output. Deletion only happens
//! when explicitly forced, and every duplicate group always keeps at least
//! one member (the keep-file, chosen by filename heuristic).

pub mod delete;

pub use delete::{delete_duplicates, BatchDeleteResult, DeleteError};
