//! Archive Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Only structural corruption of the whole archive is an error here; a
//! single unreadable set or a malformed comment record is recorded as a
//! [`LoadWarning`](crate::LoadWarning) on the registry instead.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// An archive error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The archive root itself cannot be read; nothing can be loaded.
    #[display("archive root not readable: {}", _0.display())]
    ArchiveRoot(#[error(not(source))] PathBuf),
    /// The metadata-provider cache file cannot be read or parsed.
    #[display("provider cache not readable: {}", _0.display())]
    ProviderCache(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Both variants mean a file is missing or corrupt on disk; running
        // again without fixing the input will fail the same way.
        false
    }
}
