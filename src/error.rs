//! Error types for entcopy.
//!
//! This module provides the [`Error`] enum containing every way a copy can
//! fail, the stable [`ErrorCode`] taxonomy callers branch on, and the
//! [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Code | Errors |
//! |------|--------|
//! | `SOURCE_NOT_FOUND` | [`Error::SourceNotFound`] |
//! | `DEST_EXISTS` | [`Error::AlreadyExists`] |
//! | `UNSUPPORTED_KIND` | [`Error::UnsupportedKind`] |
//! | `READ_FAILURE` | [`Error::Read`] |
//! | `WRITE_FAILURE` | [`Error::Write`] |
//! | pass-through | [`Error::Io`] (`PERMISSION_DENIED` or `IO_ERROR`) |

use crate::fs::EntryKind;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for entcopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error is permission-class.
///
/// This is the condition under which a Windows directory symlink is retried
/// as a junction.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | All | [`io::ErrorKind::PermissionDenied`] (`EPERM`, `EACCES`, `ERROR_ACCESS_DENIED`) |
/// | Windows | `ERROR_PRIVILEGE_NOT_HELD` (1314) |
pub fn is_permission_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }

    #[cfg(windows)]
    {
        // Unprivileged CreateSymbolicLinkW without developer mode
        const ERROR_PRIVILEGE_NOT_HELD: i32 = 1314;
        if error.raw_os_error() == Some(ERROR_PRIVILEGE_NOT_HELD) {
            return true;
        }
    }

    false
}

/// Stable, closed classification of copy failures.
///
/// Unlike [`Error`], which carries paths and underlying causes, an
/// `ErrorCode` is a plain discriminant suitable for matching, exit codes,
/// and machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ErrorCode {
    /// The source path does not exist.
    SourceNotFound,
    /// Something already exists at the destination path.
    DestExists,
    /// The source is not a regular file or symlink.
    UnsupportedKind,
    /// Reading source bytes failed.
    ReadFailure,
    /// Writing or committing destination bytes failed.
    WriteFailure,
    /// A pass-through OS failure of the permission class.
    PermissionDenied,
    /// Any other pass-through OS failure.
    IoError,
}

impl ErrorCode {
    /// The stable string form of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceNotFound => "SOURCE_NOT_FOUND",
            Self::DestExists => "DEST_EXISTS",
            Self::UnsupportedKind => "UNSUPPORTED_KIND",
            Self::ReadFailure => "READ_FAILURE",
            Self::WriteFailure => "WRITE_FAILURE",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::IoError => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while copying an entry.
///
/// All errors include the path they concern. Variants that wrap an
/// [`io::Error`] keep it intact, so the original OS code stays reachable
/// through [`Error::raw_os_error`] or the [`std::error::Error::source`] chain.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source path does not exist
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Destination already exists (of any kind); entcopy never overwrites
    #[error("Destination already exists: {0}")]
    AlreadyExists(PathBuf),

    /// Source is a directory, device, FIFO, socket, or unknown object
    #[error("Cannot copy {kind} (only files and symlinks are supported): {path}")]
    UnsupportedKind {
        /// Source path
        path: PathBuf,
        /// What the source turned out to be
        kind: EntryKind,
    },

    /// Failed to read source content
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to write or commit destination content
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Any other OS-level failure, passed through unchanged
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path the failing operation was applied to
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The stable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::AlreadyExists(_) => ErrorCode::DestExists,
            Self::UnsupportedKind { .. } => ErrorCode::UnsupportedKind,
            Self::Read { .. } => ErrorCode::ReadFailure,
            Self::Write { .. } => ErrorCode::WriteFailure,
            Self::Io { source, .. } if is_permission_error(source) => ErrorCode::PermissionDenied,
            Self::Io { .. } => ErrorCode::IoError,
        }
    }

    /// The path this error concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceNotFound(path) | Self::AlreadyExists(path) => path,
            Self::UnsupportedKind { path, .. }
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// The underlying IO error, if this failure came from one.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } | Self::Io { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }

    /// The original OS error number, if one was reported.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().and_then(io::Error::raw_os_error)
    }
}
