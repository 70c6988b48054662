//! Symlink copy strategy.
//!
//! The link's target text is reproduced verbatim at the destination. How the
//! new link is created depends on the platform's semantics, expressed as two
//! implementations of [`LinkStrategy`] chosen once per copy.

use crate::error::{Error, Result, is_permission_error};
use crate::fs::{EntryKind, FileSystem, LinkType};
use crate::options::Platform;
use crate::utils::path::resolve_link_target;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Result of a successful symlink copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkCopy {
    pub target: PathBuf,
    pub link_type: Option<LinkType>,
}

/// Re-creates a link with the same target text at a new path.
#[async_trait]
pub(crate) trait LinkStrategy: Send + Sync {
    /// Create `dst` pointing at `target`, which was read from the link `src`.
    ///
    /// Returns the link type that was declared, if the platform needs one.
    async fn recreate(
        &self,
        fs: &dyn FileSystem,
        src: &Path,
        target: &Path,
        dst: &Path,
    ) -> Result<Option<LinkType>>;
}

/// Unix-like platforms: links are untyped.
#[derive(Debug)]
pub(crate) struct UnixLinks;

#[async_trait]
impl LinkStrategy for UnixLinks {
    async fn recreate(
        &self,
        fs: &dyn FileSystem,
        _src: &Path,
        target: &Path,
        dst: &Path,
    ) -> Result<Option<LinkType>> {
        fs.symlink(target, dst, None)
            .await
            .map_err(|e| link_error(dst, e))?;
        Ok(None)
    }
}

/// Windows-like platforms: the link type is declared up front.
///
/// Directory symlinks need elevation (or developer mode); when creating one
/// is refused, a junction is created instead.
#[derive(Debug)]
pub(crate) struct WindowsLinks;

#[async_trait]
impl LinkStrategy for WindowsLinks {
    async fn recreate(
        &self,
        fs: &dyn FileSystem,
        src: &Path,
        target: &Path,
        dst: &Path,
    ) -> Result<Option<LinkType>> {
        let resolved = resolve_link_target(src, target).map_err(|e| Error::io(src, e))?;
        let is_dir = match fs.metadata(&resolved).await {
            Ok(kind) => kind == EntryKind::Directory,
            // Dangling: nothing says directory, so a file link it is
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing")]
                tracing::debug!(resolved = %resolved.display(), "link target missing");
                false
            }
            Err(e) => return Err(Error::io(&resolved, e)),
        };

        if !is_dir {
            fs.symlink(target, dst, Some(LinkType::File))
                .await
                .map_err(|e| link_error(dst, e))?;
            return Ok(Some(LinkType::File));
        }

        match fs.symlink(target, dst, Some(LinkType::Dir)).await {
            Ok(()) => Ok(Some(LinkType::Dir)),
            Err(e) if is_permission_error(&e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    dst = %dst.display(),
                    error = %e,
                    "directory symlink refused, creating junction"
                );
                fs.symlink(target, dst, Some(LinkType::Junction))
                    .await
                    .map_err(|e| link_error(dst, e))?;
                Ok(Some(LinkType::Junction))
            }
            Err(e) => Err(link_error(dst, e)),
        }
    }
}

/// Something created `dst` after it was probed: same answer as an occupied
/// destination, as for a file commit.
fn link_error(dst: &Path, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::AlreadyExists {
        Error::AlreadyExists(dst.to_path_buf())
    } else {
        Error::io(dst, e)
    }
}

/// The strategy for a platform.
pub(crate) fn strategy_for(platform: Platform) -> &'static dyn LinkStrategy {
    if platform.is_windows_like() {
        &WindowsLinks
    } else {
        &UnixLinks
    }
}

/// Copy the symlink `src` to the absent path `dst`.
///
/// No mode or ownership is applied to the new link.
pub(crate) async fn copy_symlink(
    fs: &dyn FileSystem,
    src: &Path,
    dst: &Path,
    platform: Platform,
) -> Result<LinkCopy> {
    let target = fs.read_link(src).await.map_err(|e| Error::io(src, e))?;
    let link_type = strategy_for(platform)
        .recreate(fs, src, &target, dst)
        .await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        dst = %dst.display(),
        target = %target.display(),
        link_type = link_type.map(LinkType::as_str),
        "created symlink"
    );

    Ok(LinkCopy { target, link_type })
}
