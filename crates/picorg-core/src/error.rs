//! Error types for `picorg-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Directory scan failures
//! and corrupt cache files are deliberately *not* errors: scans surface
//! as a listing with `exists == false` and corrupt cache files surface
//! as cache misses.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action. Nothing here is fatal
/// to the process.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Back/forward navigation was requested with nothing to move to.
    #[error("navigation history is empty")]
    EmptyHistory,

    /// An operation needed an open directory before the first navigation.
    #[error("no directory is currently open")]
    NoCurrentDirectory,

    /// An organize request is already outstanding on this navigator.
    #[error("an organize request is already in flight")]
    OrganizeBusy,

    /// The model server call failed. The directory listing stays valid.
    #[error("organize failed: {0}")]
    Organize(String),

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Failed to serialize an organization record for caching.
    #[error("cache encode error: {0}")]
    CacheEncode(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `picorg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
