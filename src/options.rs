//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`], the [`Platform`] selector for
//! symlink semantics, and the [`IdentityProvider`] capability that decides
//! whether ownership is copied.
//!
//! # Example
//!
//! ```
//! use entcopy::{CopyOptions, FixedIdentity, Platform};
//!
//! let options = CopyOptions::default()
//!     .with_platform(Platform::Windows)
//!     .with_identity(FixedIdentity(0));
//! assert!(options.is_privileged());
//! ```

use std::fmt;
use std::sync::Arc;

/// Which operating system's symlink semantics to apply.
///
/// # Default
///
/// The default is the platform the crate was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Platform {
    /// Symlinks carry no type; the target text is reproduced as-is.
    Unix,
    /// Symlinks are typed `file` or `dir` at creation time, with a
    /// junction fallback for directories.
    Windows,
}

impl Platform {
    /// The platform this binary runs on.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Whether symlink creation needs a declared link type.
    #[must_use]
    pub const fn is_windows_like(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::host()
    }
}

/// Source of the effective user id of the copying process.
///
/// Ownership is only copied when this reports `0`.
pub trait IdentityProvider: fmt::Debug + Send + Sync {
    /// Effective user id.
    fn effective_uid(&self) -> u32;
}

/// The identity of the running process.
///
/// On Unix this is `geteuid()`. Other platforms have no uid, so the process
/// is reported as unprivileged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdentity;

impl IdentityProvider for SystemIdentity {
    #[cfg(unix)]
    fn effective_uid(&self) -> u32 {
        // SAFETY: geteuid has no preconditions and cannot fail
        unsafe { libc::geteuid() }
    }

    #[cfg(not(unix))]
    fn effective_uid(&self) -> u32 {
        u32::MAX
    }
}

/// A fixed identity, for callers that already know who they are (and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIdentity(pub u32);

impl IdentityProvider for FixedIdentity {
    fn effective_uid(&self) -> u32 {
        self.0
    }
}

/// Options for copy operations.
///
/// Use [`Default::default()`] to get the host's behaviour, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `platform` | [`Platform::host()`] | Symlink semantics |
/// | `identity` | [`SystemIdentity`] | Effective uid source |
///
/// There is deliberately no overwrite option: a destination that exists in
/// any form always fails the copy.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Symlink semantics to apply
    pub platform: Platform,

    /// Who the copy runs as
    pub identity: Arc<dyn IdentityProvider>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            platform: Platform::host(),
            identity: Arc::new(SystemIdentity),
        }
    }
}

impl CopyOptions {
    /// Set the symlink semantics
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the identity provider
    #[must_use]
    pub fn with_identity(mut self, identity: impl IdentityProvider + 'static) -> Self {
        self.identity = Arc::new(identity);
        self
    }

    /// Whether ownership should be copied (effective uid is 0).
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.identity.effective_uid() == 0
    }
}
