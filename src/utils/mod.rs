//! Internal helpers shared by the copy engine and the OS filesystem.

pub(crate) mod path;
