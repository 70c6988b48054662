//! Symlink handling integration tests for ecp CLI.
//!
//! These tests verify proper handling of symbolic links:
//! - A symlink is copied as a symlink, never as its target's content
//! - The link text is reproduced verbatim, relative or absolute
//! - Dangling symlinks are copied like any other
//! - `--links windows` classifies the target before creating the link

#[cfg(unix)]
mod unix_tests {
    use crate::common::TestFixture;
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;

    /// Test that a symlink is re-created rather than followed.
    #[test]
    fn test_symlink_copied_as_link() {
        let fx = TestFixture::new();
        fx.file("a.txt", "target content");
        let link1 = fx.symlink("a.txt", "link1");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&link1)
            .arg(fx.path("link2"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied symlink -> a.txt"));

        let metadata = fs::symlink_metadata(fx.path("link2")).unwrap();
        assert!(metadata.file_type().is_symlink(), "Should be a symlink");
        assert_eq!(fs::read_link(fx.path("link2")).unwrap(), Path::new("a.txt"));
    }

    /// Test that relative link text is kept even when it climbs upward.
    #[test]
    fn test_relative_link_text_verbatim() {
        let fx = TestFixture::new();
        fs::create_dir(fx.path("sub")).unwrap();
        let link = fx.symlink("../other/x", "sub/link");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&link).arg(fx.path("copy")).assert().success();

        assert_eq!(
            fs::read_link(fx.path("copy")).unwrap(),
            Path::new("../other/x")
        );
    }

    /// Test that a dangling symlink is copied.
    #[test]
    fn test_dangling_symlink() {
        let fx = TestFixture::new();
        let link = fx.symlink("does/not/exist", "dangling");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&link).arg(fx.path("dangling.copy")).assert().success();

        assert_eq!(
            fs::read_link(fx.path("dangling.copy")).unwrap(),
            Path::new("does/not/exist")
        );
    }

    /// Test that an existing dangling symlink at the destination is not replaced.
    #[test]
    fn test_dangling_symlink_destination_exists() {
        let fx = TestFixture::new();
        let src = fx.file("a.txt", "content");
        let dst = fx.symlink("missing", "dst");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&src)
            .arg(&dst)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("error[DEST_EXISTS]"));

        assert_eq!(fs::read_link(&dst).unwrap(), Path::new("missing"));
    }

    /// Test that a symlink to a directory is copied, not rejected.
    #[test]
    fn test_directory_symlink() {
        let fx = TestFixture::new();
        fs::create_dir(fx.path("target_dir")).unwrap();
        let link = fx.symlink("target_dir", "dir_link");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg(&link).arg(fx.path("dir_link.copy")).assert().success();

        assert!(fs::symlink_metadata(fx.path("dir_link.copy"))
            .unwrap()
            .file_type()
            .is_symlink());
    }

    /// Test Windows semantics: the link type follows the resolved target.
    #[test]
    fn test_windows_links_report_link_type() {
        let fx = TestFixture::new();
        fs::create_dir(fx.path("target_dir")).unwrap();
        fx.file("a.txt", "content");
        let dir_link = fx.symlink("target_dir", "dir_link");
        let file_link = fx.symlink("a.txt", "file_link");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg("--links")
            .arg("windows")
            .arg(&dir_link)
            .arg(fx.path("dir_link.copy"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied dir link -> target_dir"));

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg("--links")
            .arg("windows")
            .arg(&file_link)
            .arg(fx.path("file_link.copy"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied file link -> a.txt"));
    }

    /// Test Windows semantics: a dangling target is not a directory, so it gets a file link.
    #[test]
    fn test_windows_links_dangling_target_gets_file_link() {
        let fx = TestFixture::new();
        let link = fx.symlink("nowhere", "dangling");

        let mut cmd = cargo_bin_cmd!("ecp");
        cmd.arg("--links")
            .arg("windows")
            .arg(&link)
            .arg(fx.path("copy"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Copied file link -> nowhere"));

        assert_eq!(fs::read_link(fx.path("copy")).unwrap(), Path::new("nowhere"));
    }
}
