//! [`FileSystem`] backed by the real operating system.
//!
//! Atomic writes use a temporary file in the destination directory that is
//! persisted with `persist_noclobber` (backed by `renameat2(RENAME_NOREPLACE)`
//! on Linux), so the destination either appears complete or not at all, and
//! a destination created concurrently is never clobbered.

use super::{
    AtomicWrite, AtomicWriteOptions, ByteSource, EntryKind, EntryMetadata, FileSystem, LinkType,
    Ownership,
};
use crate::utils::path::safe_path;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};
use tempfile::TempPath;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Run a blocking filesystem call off the async worker threads.
async fn blocking<T, F>(f: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(io::Error::other)?
}

/// The default [`FileSystem`]: `tokio::fs` plus `tempfile` for atomic writes.
///
/// # Example
///
/// ```no_run
/// use entcopy::{Copier, CopyOptions, OsFileSystem};
/// use std::path::Path;
///
/// # async fn demo() -> entcopy::Result<()> {
/// let copier = Copier::new(OsFileSystem::default().without_fsync(), CopyOptions::default());
/// copier.copy(Path::new("a.txt"), Path::new("b.txt")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OsFileSystem {
    fsync: bool,
}

impl Default for OsFileSystem {
    fn default() -> Self {
        Self { fsync: true }
    }
}

impl OsFileSystem {
    /// Skip `fsync` before committing a file (faster but less durable).
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Whether committed files are synced to disk first.
    #[must_use]
    pub fn fsync(&self) -> bool {
        self.fsync
    }
}

#[async_trait]
impl FileSystem for OsFileSystem {
    async fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let meta = tokio::fs::symlink_metadata(path).await?;
        Ok(EntryMetadata::from_std(&meta))
    }

    async fn metadata(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(EntryKind::from_file_type(meta.file_type()))
    }

    async fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        tokio::fs::read_link(path).await
    }

    #[cfg(unix)]
    async fn symlink(
        &self,
        target: &Path,
        link: &Path,
        _link_type: Option<LinkType>,
    ) -> io::Result<()> {
        // Unix links carry no type; a requested type is satisfied by a plain link
        tokio::fs::symlink(target, link).await
    }

    #[cfg(windows)]
    async fn symlink(
        &self,
        target: &Path,
        link: &Path,
        link_type: Option<LinkType>,
    ) -> io::Result<()> {
        match link_type {
            Some(LinkType::File) => tokio::fs::symlink_file(target, link).await,
            Some(LinkType::Dir) => tokio::fs::symlink_dir(target, link).await,
            Some(LinkType::Junction) => {
                // Junctions only store absolute targets
                let target = crate::utils::path::resolve_link_target(link, target)?;
                let link = link.to_path_buf();
                blocking(move || junction::create(&target, &link)).await
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "a link type is required to create a symlink on Windows",
            )),
        }
    }

    #[cfg(not(any(unix, windows)))]
    async fn symlink(
        &self,
        _target: &Path,
        _link: &Path,
        _link_type: Option<LinkType>,
    ) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Symlinks not supported on this platform",
        ))
    }

    async fn open_read(&self, path: &Path) -> io::Result<ByteSource> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Box::new(file))
    }

    async fn open_atomic_write(
        &self,
        path: &Path,
        options: AtomicWriteOptions,
    ) -> io::Result<Box<dyn AtomicWrite>> {
        let file = OsAtomicFile::create(path, options, self.fsync).await?;
        Ok(Box::new(file))
    }

    #[cfg(unix)]
    async fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await
    }

    #[cfg(not(unix))]
    async fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        // Only the owner write bit has a counterpart: the read-only attribute
        let mut perms = tokio::fs::metadata(path).await?.permissions();
        perms.set_readonly(mode & 0o200 == 0);
        tokio::fs::set_permissions(path, perms).await
    }
}

/// Temporary file that becomes `dst` on commit and deletes itself otherwise.
struct OsAtomicFile {
    file: tokio::fs::File,
    temp_path: TempPath,
    dst: PathBuf,
    ownership: Option<Ownership>,
    fsync: bool,
}

impl OsAtomicFile {
    async fn create(dst: &Path, options: AtomicWriteOptions, fsync: bool) -> io::Result<Self> {
        // Temp file must live on the same filesystem for the rename to be atomic
        let parent = match dst.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let safe_parent = safe_path(parent);

        let temp = blocking(move || {
            tempfile::Builder::new()
                .prefix(".entcopy-")
                .tempfile_in(&safe_parent)
        })
        .await?;
        let (file, temp_path) = temp.into_parts();

        Ok(Self {
            file: tokio::fs::File::from_std(file),
            temp_path,
            dst: safe_path(dst),
            ownership: options.ownership,
            fsync,
        })
    }
}

impl AsyncWrite for OsAtomicFile {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.file).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.file).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.file).poll_shutdown(cx)
    }
}

#[async_trait]
impl AtomicWrite for OsAtomicFile {
    async fn commit(self: Box<Self>) -> io::Result<()> {
        let Self {
            mut file,
            temp_path,
            dst,
            ownership,
            fsync,
        } = *self;

        file.flush().await?;
        if fsync {
            file.sync_all().await?;
        }
        // Windows cannot rename a file with an open handle
        drop(file);

        #[cfg(unix)]
        if let Some(Ownership { uid, gid }) = ownership {
            let path = temp_path.to_path_buf();
            blocking(move || std::os::unix::fs::chown(&path, Some(uid), Some(gid))).await?;
        }
        #[cfg(not(unix))]
        let _ = ownership;

        // On failure the returned TempPath is dropped, removing the temp file
        blocking(move || temp_path.persist_noclobber(&dst).map_err(|e| e.error)).await
    }
}
