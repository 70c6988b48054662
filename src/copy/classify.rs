//! Source classification and destination probing.
//!
//! Both lookups use `lstat` semantics: a symlink is classified as a symlink,
//! never as whatever it points to.

use crate::error::{Error, Result};
use crate::fs::{EntryKind, EntryMetadata, FileSystem};
use std::io;
use std::path::Path;

/// What the destination lookup found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DestinationProbe {
    /// Nothing there; the copy may proceed
    Absent,
    /// Something of this kind is there; the copy must fail
    Present(EntryKind),
}

/// Snapshot the source without following a final symlink.
pub(crate) async fn classify<F>(fs: &F, src: &Path) -> Result<EntryMetadata>
where
    F: FileSystem + ?Sized,
{
    match fs.symlink_metadata(src).await {
        Ok(meta) => Ok(meta),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(Error::SourceNotFound(src.to_path_buf()))
        }
        Err(e) => Err(Error::io(src, e)),
    }
}

/// Check whether anything occupies the destination.
///
/// Only a not-found answer counts as absent. Any other failure (permission
/// denied on the parent, for instance) is returned rather than guessed at.
pub(crate) async fn probe<F>(fs: &F, dst: &Path) -> Result<DestinationProbe>
where
    F: FileSystem + ?Sized,
{
    match fs.symlink_metadata(dst).await {
        Ok(meta) => Ok(DestinationProbe::Present(meta.kind)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DestinationProbe::Absent),
        Err(e) => Err(Error::io(dst, e)),
    }
}
