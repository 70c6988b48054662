//! File type conflict integration tests for ecp CLI.
//!
//! Whatever occupies the destination, the copy fails with DEST_EXISTS and
//! the existing entry is left untouched. Unlike `cp`, ecp never copies into
//! an existing directory.

use crate::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;

/// Test that copying a file to an existing directory path fails.
#[test]
fn test_file_to_existing_directory_fails() {
    let fx = TestFixture::new();
    let src = fx.file("file.txt", "content");
    fs::create_dir(fx.path("existing_dir")).unwrap();

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src)
        .arg(fx.path("existing_dir"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[DEST_EXISTS]"));

    assert!(fs::read_dir(fx.path("existing_dir")).unwrap().next().is_none());
}

/// Test that a file never replaces another file, whatever its content.
#[rstest]
#[case::same_content("same", "same")]
#[case::different_content("new", "old")]
#[case::empty_destination("new", "")]
fn test_file_to_existing_file_fails(#[case] src_content: &str, #[case] dst_content: &str) {
    let fx = TestFixture::new();
    let src = fx.file("a.txt", src_content);
    let dst = fx.file("b.txt", dst_content);

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src)
        .arg(&dst)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[DEST_EXISTS]"));

    fx.assert_file_content(&dst, dst_content);
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::path::Path;

    /// Test that a symlink never replaces a file.
    #[test]
    fn test_symlink_to_existing_file_fails() {
        let fx = TestFixture::new();
        let link = fx.symlink("a.txt", "link");
        let dst = fx.file("b.txt", "old");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&link)
            .arg(&dst)
            .assert()
            .failure()
            .stderr(predicate::str::contains("error[DEST_EXISTS]"));

        fx.assert_file_content(&dst, "old");
    }

    /// Test that a file never replaces a symlink, nor writes through it.
    #[test]
    fn test_file_to_existing_symlink_fails() {
        let fx = TestFixture::new();
        let src = fx.file("a.txt", "new");
        fx.file("target.txt", "untouched");
        let dst = fx.symlink("target.txt", "link");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&src).arg(&dst).assert().failure();

        assert_eq!(fs::read_link(&dst).unwrap(), Path::new("target.txt"));
        fx.assert_file_content(&fx.path("target.txt"), "untouched");
    }

    /// Test that a FIFO source is rejected without creating anything.
    #[test]
    fn test_fifo_source_is_unsupported() {
        let fx = TestFixture::new();
        let fifo = fx.path("fifo");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status();
        if !matches!(status, Ok(s) if s.success()) {
            return;
        }

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&fifo)
            .arg(fx.path("fifo.copy"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("error[UNSUPPORTED_KIND]"))
            .stderr(predicate::str::contains("fifo"));

        assert!(!fx.path("fifo.copy").exists());
    }

    /// Test that a character device source is rejected.
    #[test]
    fn test_char_device_source_is_unsupported() {
        let fx = TestFixture::new();

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg("/dev/null")
            .arg(fx.path("null.copy"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("error[UNSUPPORTED_KIND]"));

        assert!(!fx.path("null.copy").exists());
    }
}
