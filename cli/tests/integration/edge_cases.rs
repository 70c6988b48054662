//! Edge case integration tests for ecp CLI.
//!
//! These tests cover:
//! - Symlink handling under both link semantics
//! - Destinations that are occupied by a different kind of entry
//! - Special source kinds

#[path = "../common/mod.rs"]
mod common;

#[path = "edge_cases/file_type_conflict.rs"]
mod file_type_conflict;

#[path = "edge_cases/symlink_handling.rs"]
mod symlink_handling;
