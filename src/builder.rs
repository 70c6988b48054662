//! Builder API for ergonomic copying.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a single copy. This is often more convenient than constructing
//! [`CopyOptions`] and a [`Copier`] by hand.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use entcopy::CopyBuilder;
//!
//! # async fn demo() -> entcopy::Result<()> {
//! let outcome = CopyBuilder::new("a.txt", "b.txt").run().await?;
//! println!("Copied {:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Windows Link Semantics
//!
//! ```no_run
//! use entcopy::{CopyBuilder, FixedIdentity};
//!
//! # async fn demo() -> entcopy::Result<()> {
//! CopyBuilder::new("link", "link.copy")
//!     .windows_links()
//!     .identity(FixedIdentity(0))
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::copy::{Copier, CopyOutcome};
use crate::error::Result;
use crate::fs::OsFileSystem;
use crate::options::{CopyOptions, IdentityProvider, Platform};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing one copy.
///
/// # Example
///
/// ```no_run
/// use entcopy::CopyBuilder;
///
/// # async fn demo() -> entcopy::Result<()> {
/// CopyBuilder::new("/data/report.csv", "/backup/report.csv")
///     .no_fsync()
///     .run()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
    fs: OsFileSystem,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (host link semantics, system identity, fsync on).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
            fs: OsFileSystem::default(),
        }
    }

    /// Select the symlink semantics to apply.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.options = self.options.with_platform(platform);
        self
    }

    /// Use Windows link semantics (typed links, junction fallback).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entcopy::CopyBuilder;
    ///
    /// # async fn demo() -> entcopy::Result<()> {
    /// CopyBuilder::new("dir_link", "dir_link.copy")
    ///     .windows_links()
    ///     .run()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn windows_links(self) -> Self {
        self.platform(Platform::Windows)
    }

    /// Use Unix link semantics (untyped links).
    #[must_use]
    pub fn unix_links(self) -> Self {
        self.platform(Platform::Unix)
    }

    /// Decide privilege with `identity` instead of the running process.
    ///
    /// Ownership is only copied when the identity reports uid 0.
    #[must_use]
    pub fn identity(mut self, identity: impl IdentityProvider + 'static) -> Self {
        self.options = self.options.with_identity(identity);
        self
    }

    /// Disable fsync before a copied file is committed.
    ///
    /// This improves performance but reduces durability guarantees.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.fs = self.fs.without_fsync();
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Source doesn't exist
    /// - Destination already exists, in any form
    /// - Source is not a regular file or symlink
    /// - I/O error during copy
    pub async fn run(self) -> Result<CopyOutcome> {
        Copier::new(self.fs, self.options)
            .copy(&self.src, &self.dst)
            .await
    }
}
