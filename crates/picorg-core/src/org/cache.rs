//! Per-directory organization cache.
//!
//! Caches model-server results on disk as one JSON file per directory,
//! named by percent-encoding the directory's absolute path. A corrupt
//! cache file is treated as a miss (logged), never as a fatal error.
//! The cache is not invalidated when a directory's contents change;
//! only an explicit refresh recomputes it.

use std::path::{Path, PathBuf};

use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{CoreError, CoreResult};
use crate::org::client::Organizer;
use crate::org::record::OrganizationRecord;

/// Everything except `[A-Za-z0-9]`, `-`, `_` and `.` is percent-encoded.
/// `%` itself is in the set, so the encoding is total and reversible:
/// paths differing in encoding-sensitive characters get distinct keys.
const KEY_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Returns the default cache directory, `$HOME/.config/picorg/organized`.
pub fn default_cache_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("picorg")
        .join("organized")
}

/// Disk-backed cache of [`OrganizationRecord`]s, keyed by directory path.
#[derive(Debug, Clone)]
pub struct OrganizationCache {
    cache_dir: PathBuf,
}

impl OrganizationCache {
    /// Creates a cache rooted at `cache_dir`. The directory is created
    /// lazily on the first write.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the filesystem-safe cache file name for a directory path.
    ///
    /// The raw path bytes are encoded, so two distinct paths always get
    /// distinct keys, even when they are not valid UTF-8.
    #[cfg(unix)]
    pub fn key(dir: &Path) -> String {
        use std::os::unix::ffi::OsStrExt;
        let encoded = percent_encode(dir.as_os_str().as_bytes(), KEY_SET);
        format!("{encoded}.json")
    }

    /// Returns the filesystem-safe cache file name for a directory path.
    ///
    /// `OsStr` does not expose its bytes off Unix; Windows paths are
    /// valid Unicode in practice, so encoding the string form is total
    /// there.
    #[cfg(not(unix))]
    pub fn key(dir: &Path) -> String {
        let lossy = dir.to_string_lossy();
        let encoded = percent_encode(lossy.as_bytes(), KEY_SET);
        format!("{encoded}.json")
    }

    /// Returns the full path of the cache file for `dir`.
    pub fn cache_file(&self, dir: &Path) -> PathBuf {
        self.cache_dir.join(Self::key(dir))
    }

    /// Returns the cached record for `dir`, or `None` on a miss.
    ///
    /// An unreadable or unparseable cache file is a miss, logged at warn
    /// level, not an error.
    pub fn read(&self, dir: &Path) -> Option<OrganizationRecord> {
        let file = self.cache_file(dir);
        let contents = std::fs::read_to_string(&file).ok()?;
        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("corrupt organization cache {}: {}", file.display(), e);
                None
            }
        }
    }

    /// Stores `record` as the cached organization for `dir`, creating the
    /// cache directory if absent.
    pub fn write(&self, dir: &Path, record: &OrganizationRecord) -> CoreResult<()> {
        std::fs::create_dir_all(&self.cache_dir)?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| CoreError::CacheEncode(e.to_string()))?;
        std::fs::write(self.cache_file(dir), json)?;
        Ok(())
    }

    /// Deletes the cached record for `dir`. A missing file is a
    /// successful no-op.
    pub fn invalidate(&self, dir: &Path) -> CoreResult<()> {
        match std::fs::remove_file(self.cache_file(dir)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Returns the organization for `dir`, computing it only on a miss.
    ///
    /// With `force_refresh` (or on a miss) the cached file is invalidated,
    /// `organizer.organize(dir)` is awaited and its result cached. This is
    /// the single place the external model server is invoked. A failed
    /// cache write after a successful compute is logged and does not fail
    /// the fetch.
    pub async fn fetch<O: Organizer + ?Sized>(
        &self,
        dir: &Path,
        force_refresh: bool,
        organizer: &O,
    ) -> CoreResult<OrganizationRecord> {
        if !force_refresh {
            if let Some(record) = self.read(dir) {
                return Ok(record);
            }
        }

        self.invalidate(dir)?;
        let record = organizer
            .organize(dir)
            .await
            .map_err(|e| CoreError::Organize(e.to_string()))?;
        if let Err(e) = self.write(dir, &record) {
            tracing::warn!("failed to cache organization for {}: {}", dir.display(), e);
        }
        Ok(record)
    }
}
