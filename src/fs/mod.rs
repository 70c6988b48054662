//! Filesystem capabilities consumed by the copy engine.
//!
//! The engine never touches the disk directly. Everything it needs is
//! expressed by the [`FileSystem`] trait, so tests can script every answer
//! and [`OsFileSystem`] can provide the real thing.

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncWrite};

mod os;


pub use os::OsFileSystem;

/// What kind of object a path names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link (never followed when classifying)
    Symlink,
    /// Block device
    BlockDevice,
    /// Character device
    CharDevice,
    /// Named pipe
    Fifo,
    /// Unix domain socket
    Socket,
    /// Anything the platform reports that is none of the above
    Unknown,
}

impl EntryKind {
    /// Classify a [`std::fs::FileType`].
    ///
    /// The symlink check comes first: a `FileType` from `symlink_metadata`
    /// on a link answers `is_symlink()` and nothing else.
    #[must_use]
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            return Self::Symlink;
        }
        if file_type.is_file() {
            return Self::File;
        }
        if file_type.is_dir() {
            return Self::Directory;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if file_type.is_block_device() {
                return Self::BlockDevice;
            }
            if file_type.is_char_device() {
                return Self::CharDevice;
            }
            if file_type.is_fifo() {
                return Self::Fifo;
            }
            if file_type.is_socket() {
                return Self::Socket;
            }
        }

        Self::Unknown
    }

    /// Whether the engine has a copy strategy for this kind.
    #[must_use]
    pub const fn is_copyable(self) -> bool {
        matches!(self, Self::File | Self::Symlink)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::BlockDevice => "block device",
            Self::CharDevice => "character device",
            Self::Fifo => "fifo",
            Self::Socket => "socket",
            Self::Unknown => "unknown object",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User and group that own a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    /// User id
    pub uid: u32,
    /// Group id
    pub gid: u32,
}

/// Snapshot of a path's own metadata (taken without following a final symlink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    /// What the path names
    pub kind: EntryKind,
    /// Explicit permission bits, if recorded
    pub mode: Option<u32>,
    /// Owner, if recorded
    pub ownership: Option<Ownership>,
}

impl EntryMetadata {
    /// Metadata with only a kind; no mode or ownership recorded.
    #[must_use]
    pub const fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            mode: None,
            ownership: None,
        }
    }

    /// Record explicit permission bits.
    #[must_use]
    pub const fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Record an owner.
    #[must_use]
    pub const fn with_ownership(mut self, uid: u32, gid: u32) -> Self {
        self.ownership = Some(Ownership { uid, gid });
        self
    }

    /// Build from `std` metadata obtained via `symlink_metadata`.
    ///
    /// Mode and ownership are only recorded for regular files, and only on
    /// Unix; elsewhere there is nothing comparable to carry over.
    #[must_use]
    pub fn from_std(meta: &std::fs::Metadata) -> Self {
        let kind = EntryKind::from_file_type(meta.file_type());

        #[cfg(unix)]
        if kind == EntryKind::File {
            use std::os::unix::fs::MetadataExt;
            return Self::new(kind)
                .with_mode(meta.mode() & 0o7777)
                .with_ownership(meta.uid(), meta.gid());
        }

        Self::new(kind)
    }
}

/// Link type declared when creating a symlink on Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LinkType {
    /// File symbolic link
    File,
    /// Directory symbolic link (usually needs elevation or developer mode)
    Dir,
    /// NTFS junction (directory only, no elevation needed)
    Junction,
}

impl LinkType {
    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Junction => "junction",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instructions applied by an atomic write target when it commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtomicWriteOptions {
    /// Change the owner of the committed file
    pub ownership: Option<Ownership>,
}

/// Readable byte stream over a source file.
pub type ByteSource = Box<dyn AsyncRead + Send + Unpin>;

/// A write target that only becomes visible at its path once committed.
///
/// Dropping the target without calling [`AtomicWrite::commit`] discards
/// everything written so far; the destination path is never touched.
#[async_trait]
pub trait AtomicWrite: AsyncWrite + Send + Unpin {
    /// Flush, apply ownership, and publish the content at the destination.
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] if something appeared at
    /// the destination after the write target was opened.
    async fn commit(self: Box<Self>) -> io::Result<()>;
}

/// The filesystem operations the copy engine relies on.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Inspect a path without following a final symlink (`lstat`).
    async fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata>;

    /// Inspect a path, following symlinks (`stat`).
    async fn metadata(&self, path: &Path) -> io::Result<EntryKind>;

    /// Read the raw target text of a symlink.
    async fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Create a symlink at `link` pointing to `target`.
    ///
    /// `link_type` is `None` on Unix-like platforms and required on Windows.
    async fn symlink(
        &self,
        target: &Path,
        link: &Path,
        link_type: Option<LinkType>,
    ) -> io::Result<()>;

    /// Open a byte stream over a file's content.
    async fn open_read(&self, path: &Path) -> io::Result<ByteSource>;

    /// Open an atomic write target for `path`.
    async fn open_atomic_write(
        &self,
        path: &Path,
        options: AtomicWriteOptions,
    ) -> io::Result<Box<dyn AtomicWrite>>;

    /// Set permission bits on `path` (`chmod`).
    async fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;
}
