//! # entcopy
//!
//! Atomic, non-clobbering, single-entry copying for Rust.
//!
//! ## Core Features
//!
//! - **One entry at a time**: copies exactly one regular file or symlink
//! - **Atomic writes**: file content goes to a temporary file that is renamed into place
//! - **Never overwrites**: an existing destination of any kind fails the copy, and
//!   `persist_noclobber` closes the race between the check and the rename
//! - **Symlink aware**: symlinks are copied as links, with their target text verbatim
//! - **Windows link semantics**: file/dir link types and a junction fallback when
//!   directory symlinks need privileges the process lacks
//! - **Permission preserving**: mode bits always, ownership when running as root
//! - **Stable error codes**: every failure maps onto a closed [`ErrorCode`] set
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use entcopy::CopyBuilder;
//!
//! # async fn demo() -> entcopy::Result<()> {
//! let outcome = CopyBuilder::new("a.txt", "b.txt").run().await?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use entcopy::{copy_entry, CopyOptions, ErrorCode, Platform};
//!
//! # async fn demo() {
//! let options = CopyOptions::default().with_platform(Platform::Windows);
//! match copy_entry("link", "link.copy", &options).await {
//!     Ok(outcome) => println!("copied {}", outcome.kind()),
//!     Err(e) if e.code() == ErrorCode::DestExists => eprintln!("already there"),
//!     Err(e) => eprintln!("error[{}]: {}", e.code(), e),
//! }
//! # }
//! ```
//!
//! ## Custom Filesystems
//!
//! The engine only talks to the filesystem through the [`FileSystem`] trait.
//! [`OsFileSystem`] is the real one; [`Copier`] accepts any implementation.
//!
//! ## Safety Guarantees
//!
//! ### Atomic Writes
//!
//! Files are written to a temporary file in the destination directory, then
//! renamed atomically. A failed or abandoned copy leaves no destination.
//!
//! ### TOCTOU Protection
//!
//! Uses `persist_noclobber` (backed by `renameat2(RENAME_NOREPLACE)` on Linux)
//! to atomically fail if the destination was created between the existence
//! check and the rename. Such a race reports [`ErrorCode::DestExists`].
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`Platform`], [`ErrorCode`], [`EntryKind`] and [`LinkType`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod fs;
mod options;
mod utils;

pub use builder::CopyBuilder;
pub use copy::{Copier, CopyOutcome, copy_entry};
pub use error::{Error, ErrorCode, Result, is_permission_error};
pub use fs::{
    AtomicWrite, AtomicWriteOptions, ByteSource, EntryKind, EntryMetadata, FileSystem, LinkType,
    OsFileSystem, Ownership,
};
pub use options::{CopyOptions, FixedIdentity, IdentityProvider, Platform, SystemIdentity};
