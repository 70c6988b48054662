//! Path utilities for cross-platform compatibility.
//!
//! This module resolves symlink targets the way the link itself would, and
//! handles Windows long path support for the atomic write helper.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve the target text of the symlink at `link` to an absolute path.
///
/// Relative targets are interpreted against the directory containing the
/// link, exactly as the OS does when following it. A relative `link` is
/// first anchored at the current directory. The result is normalized
/// lexically (`.` dropped, `..` applied) without touching the filesystem.
pub(crate) fn resolve_link_target(link: &Path, target: &Path) -> io::Result<PathBuf> {
    let base = link.parent().unwrap_or_else(|| Path::new(""));
    // `join` replaces `base` entirely when `target` is absolute
    let joined = base.join(target);
    let absolute = if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir()?.join(joined)
    };
    Ok(normalize_lexically(&absolute))
}

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// `..` never climbs above the root.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                );
                if !at_root {
                    normalized.pop();
                }
            }
        }
    }
    normalized
}

/// Convert a path to an extended-length path format on Windows.
///
/// On Windows, the default maximum path length is 260 characters (MAX_PATH).
/// By using the extended-length path syntax (prefixing with `\\?\`), paths
/// can be up to 32,767 characters.
///
/// The conversion follows these rules:
/// - Absolute paths like `C:\path` become `\\?\C:\path`
/// - UNC paths like `\\server\share\path` become `\\?\UNC\server\share\path`
/// - Relative paths are first made absolute against the current directory
#[cfg(windows)]
pub(crate) fn to_extended_length_path(path: &Path) -> PathBuf {
    let path_str = path.as_os_str().to_string_lossy();
    if path_str.starts_with(r"\\?\") {
        return path.to_path_buf();
    }

    if let Some(without_prefix) = path_str.strip_prefix(r"\\") {
        return PathBuf::from(format!(r"\\?\UNC\{}", without_prefix));
    }

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    // Extended-length paths are not normalized by the OS
    let absolute_path = normalize_lexically(&absolute_path);
    PathBuf::from(format!(r"\\?\{}", absolute_path.display()))
}

/// Convert a path for safe use with file operations.
///
/// On Windows the path is converted to extended-length format, since a
/// temporary file name appended to a long parent can push it past MAX_PATH.
/// On other platforms it is returned unchanged.
#[cfg(windows)]
pub(crate) fn safe_path(path: &Path) -> PathBuf {
    to_extended_length_path(path)
}

/// Convert a path for safe use with file operations.
///
/// On non-Windows platforms, this simply returns a clone of the input path.
#[cfg(not(windows))]
pub(crate) fn safe_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
