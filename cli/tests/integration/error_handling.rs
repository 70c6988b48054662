//! Error handling integration tests for ecp CLI.
//!
//! These tests verify the error contract:
//! - Every failure prints `error[CODE]: message` on stderr
//! - An existing destination is never modified
//! - Copy failures exit 1, invalid input exits 2

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_missing_source() {
    let fx = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(fx.path("nonexistent"))
        .arg(fx.path("dest"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error[SOURCE_NOT_FOUND]:"))
        .stderr(predicate::str::contains("nonexistent"));

    assert!(!fx.path("dest").exists());
}

#[test]
fn test_existing_file_is_not_overwritten() {
    let fx = TestFixture::new();
    let src = fx.file("new.txt", "new content");
    let dst = fx.file("old.txt", "old content");

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src)
        .arg(&dst)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[DEST_EXISTS]"));

    fx.assert_file_content(&dst, "old content");
}

#[test]
fn test_existing_directory_is_not_replaced() {
    let fx = TestFixture::new();
    let src = fx.file("file.txt", "content");
    fs::create_dir(fx.path("dir")).unwrap();
    fs::write(fx.path("dir/inside.txt"), "inside").unwrap();

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src)
        .arg(fx.path("dir"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[DEST_EXISTS]"));

    fx.assert_file_content(&fx.path("dir/inside.txt"), "inside");
    assert!(!fx.path("dir/file.txt").exists(), "never copies into a directory");
}

#[test]
fn test_directory_source_is_unsupported() {
    let fx = TestFixture::new();
    fs::create_dir(fx.path("srcdir")).unwrap();

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(fx.path("srcdir"))
        .arg(fx.path("dstdir"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[UNSUPPORTED_KIND]"))
        .stderr(predicate::str::contains("directory"));

    assert!(!fx.path("dstdir").exists());
}

#[test]
fn test_missing_destination_parent_is_write_failure() {
    let fx = TestFixture::new();
    let src = fx.file("a.txt", "hi");

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src)
        .arg(fx.path("no/such/dir/b.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[WRITE_FAILURE]"));
}

#[test]
fn test_empty_path_is_invalid_input() {
    let fx = TestFixture::new();
    let src = fx.file("a.txt", "hi");

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src)
        .arg("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[INVALID_INPUT]"));
}

#[test]
fn test_missing_operand_is_usage_error() {
    let fx = TestFixture::new();
    let src = fx.file("a.txt", "hi");

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src).assert().code(2);
}

#[test]
fn test_unknown_link_mode_is_usage_error() {
    let fx = TestFixture::new();
    let src = fx.file("a.txt", "hi");

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg("--links")
        .arg("plan9")
        .arg(&src)
        .arg(fx.path("b.txt"))
        .assert()
        .code(2);

    assert!(!fx.path("b.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_source_is_read_failure() {
    use std::os::unix::fs::PermissionsExt;

    // root can read anything
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let fx = TestFixture::new();
    let src = fx.file("secret.txt", "secret");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o000)).unwrap();
    scopeguard::defer! {
        let _ = fs::set_permissions(&src, fs::Permissions::from_mode(0o644));
    }

    let mut cmd = cargo_bin_cmd!("ecp");
    cmd.arg(&src)
        .arg(fx.path("copy.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[READ_FAILURE]"));

    assert!(!fx.path("copy.txt").exists());
}
