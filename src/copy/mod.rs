//! Core copy operation.
//!
//! A copy runs as a strictly sequential pipeline: the source is classified,
//! the destination is probed, and exactly one strategy runs (file, symlink,
//! or rejection). Nothing is retried except the junction fallback for
//! Windows directory links, and nothing is cached between calls.

mod classify;
mod file;
mod symlink;
mod utils;

use crate::error::{Error, Result};
use crate::fs::{EntryKind, FileSystem, LinkType, OsFileSystem};
use crate::options::CopyOptions;
use classify::{DestinationProbe, classify, probe};
use std::path::{Path, PathBuf};

/// What a successful copy produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// A regular file was copied.
    File {
        /// Number of bytes written to the destination
        bytes: u64,
    },
    /// A symlink was re-created.
    Symlink {
        /// The link text, reproduced verbatim
        target: PathBuf,
        /// The declared link type (`None` with Unix semantics)
        link_type: Option<LinkType>,
    },
}

impl CopyOutcome {
    /// The kind of entry that was copied.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::File { .. } => EntryKind::File,
            Self::Symlink { .. } => EntryKind::Symlink,
        }
    }
}

/// Copies single entries through a [`FileSystem`].
///
/// The copier holds no mutable state, so one instance may serve any number
/// of concurrent copies.
///
/// # Example
///
/// ```no_run
/// use entcopy::{Copier, CopyOptions, OsFileSystem, Platform};
/// use std::path::Path;
///
/// # async fn demo() -> entcopy::Result<()> {
/// let options = CopyOptions::default().with_platform(Platform::Windows);
/// let copier = Copier::new(OsFileSystem::default(), options);
/// copier.copy(Path::new("link"), Path::new("link.copy")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Copier<F = OsFileSystem> {
    fs: F,
    options: CopyOptions,
}

impl<F: FileSystem> Copier<F> {
    /// Create a copier over `fs`.
    pub fn new(fs: F, options: CopyOptions) -> Self {
        Self { fs, options }
    }

    /// The filesystem this copier works through.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// The options applied to every copy.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Copy the entry at `src` to `dst`.
    ///
    /// `dst` must not exist in any form; an existing file, directory or
    /// symlink (even a dangling one) fails the copy before any byte is read.
    ///
    /// # Errors
    ///
    /// - [`Error::SourceNotFound`] if `src` does not exist
    /// - [`Error::AlreadyExists`] if anything occupies `dst`
    /// - [`Error::UnsupportedKind`] if `src` is not a file or symlink
    /// - [`Error::Read`] / [`Error::Write`] if streaming file content fails
    /// - [`Error::Io`] for any other OS failure, passed through unchanged
    pub async fn copy(&self, src: &Path, dst: &Path) -> Result<CopyOutcome> {
        let meta = classify(&self.fs, src).await?;
        let kind = meta.kind;

        if let DestinationProbe::Present(_existing) = probe(&self.fs, dst).await? {
            #[cfg(feature = "tracing")]
            tracing::debug!(dst = %dst.display(), kind = %_existing, "destination occupied");
            return Err(Error::AlreadyExists(dst.to_path_buf()));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            src = %src.display(),
            dst = %dst.display(),
            kind = %kind,
            platform = self.options.platform.as_str(),
            "copying entry"
        );

        if !kind.is_copyable() {
            return Err(Error::UnsupportedKind {
                path: src.to_path_buf(),
                kind,
            });
        }

        if kind == EntryKind::Symlink {
            let link = symlink::copy_symlink(&self.fs, src, dst, self.options.platform).await?;
            return Ok(CopyOutcome::Symlink {
                target: link.target,
                link_type: link.link_type,
            });
        }

        let bytes = file::copy_file(&self.fs, src, dst, &meta, &self.options).await?;
        Ok(CopyOutcome::File { bytes })
    }
}

/// Copy one entry using the operating system's filesystem.
///
/// Shorthand for [`Copier::new`] over a default [`OsFileSystem`].
///
/// # Example
///
/// ```no_run
/// use entcopy::{CopyOptions, CopyOutcome, copy_entry};
///
/// # async fn demo() -> entcopy::Result<()> {
/// match copy_entry("a.txt", "b.txt", &CopyOptions::default()).await? {
///     CopyOutcome::File { bytes } => println!("copied {} bytes", bytes),
///     CopyOutcome::Symlink { target, .. } => println!("linked to {}", target.display()),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn copy_entry(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    options: &CopyOptions,
) -> Result<CopyOutcome> {
    Copier::new(OsFileSystem::default(), options.clone())
        .copy(src.as_ref(), dst.as_ref())
        .await
}
