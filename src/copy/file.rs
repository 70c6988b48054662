//! Regular file copy strategy.
//!
//! Bytes are streamed into an atomic write target, so the destination either
//! appears with its full content or not at all. Ownership is applied by the
//! target at commit time, and mode bits are applied to the committed path.

use super::utils::{TransferError, pump};
use crate::error::{Error, Result};
use crate::fs::{AtomicWriteOptions, EntryMetadata, FileSystem};
use crate::options::CopyOptions;
use std::io;
use std::path::Path;

/// Copy the regular file `src` to the absent path `dst`.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// - [`Error::Read`] if the source cannot be opened or read
/// - [`Error::Write`] if the write target cannot be opened, written or committed
/// - [`Error::AlreadyExists`] if `dst` appeared while the copy was running
/// - [`Error::Io`] if applying the mode fails
pub(crate) async fn copy_file<F>(
    fs: &F,
    src: &Path,
    dst: &Path,
    meta: &EntryMetadata,
    options: &CopyOptions,
) -> Result<u64>
where
    F: FileSystem + ?Sized,
{
    let mut reader = fs.open_read(src).await.map_err(|e| Error::read(src, e))?;

    // Only a privileged process may hand files to other users
    let write_options = AtomicWriteOptions {
        ownership: meta.ownership.filter(|_| options.is_privileged()),
    };
    let mut writer = fs
        .open_atomic_write(dst, write_options)
        .await
        .map_err(|e| Error::write(dst, e))?;

    // On any early return the writer is dropped and its temporary discarded
    let bytes = pump(&mut reader, &mut writer)
        .await
        .map_err(|e| match e {
            TransferError::Read(e) => Error::read(src, e),
            TransferError::Write(e) => Error::write(dst, e),
        })?;
    drop(reader);

    writer.commit().await.map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            Error::AlreadyExists(dst.to_path_buf())
        } else {
            Error::write(dst, e)
        }
    })?;

    #[cfg(feature = "tracing")]
    tracing::debug!(dst = %dst.display(), bytes, "committed file");

    if let Some(mode) = meta.mode {
        fs.set_mode(dst, mode).await.map_err(|e| Error::io(dst, e))?;
    }

    Ok(bytes)
}
