//! Directory listings.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::fs::entry::Entry;

/// Indices into a listing's entries, split by classification.
#[derive(Debug, Clone, Default)]
struct Partition {
    directories: Vec<usize>,
    files: Vec<usize>,
    images: Vec<usize>,
}

/// The contents of one directory, captured by a single scan.
///
/// A listing is created fresh on every navigation and never mutated.
/// When the underlying scan failed (missing path, permission denied,
/// path is a file), `exists()` is `false` and `entries()` is empty —
/// callers must check `exists()` before trusting the contents.
///
/// The directory/file/image views are computed on first access and
/// cached for the listing's lifetime.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    path: PathBuf,
    exists: bool,
    entries: Vec<Entry>,
    partition: OnceLock<Partition>,
}

impl DirectoryListing {
    /// Reads the immediate contents of `path`.
    ///
    /// A single attempt, no retry. Any I/O failure is absorbed into an
    /// `exists == false` listing and logged; it is never propagated.
    /// Entries whose metadata cannot be read are skipped. The returned
    /// entries are unsorted — apply [`crate::nav::filter::sort_entries`]
    /// after scanning.
    pub fn scan(path: &Path) -> Self {
        let read_dir = match std::fs::read_dir(path) {
            Ok(rd) => rd,
            Err(e) => {
                tracing::warn!("failed to scan {}: {}", path.display(), e);
                return Self::missing(path.to_path_buf());
            }
        };

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };
            let metadata = match dir_entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!("skipping {}: {}", dir_entry.path().display(), e);
                    continue;
                }
            };
            entries.push(Entry::new(dir_entry.path(), &metadata));
        }

        Self {
            path: path.to_path_buf(),
            exists: true,
            entries,
            partition: OnceLock::new(),
        }
    }

    /// Builds a listing for a path that could not be read.
    pub fn missing(path: PathBuf) -> Self {
        Self {
            path,
            exists: false,
            entries: Vec::new(),
            partition: OnceLock::new(),
        }
    }

    /// Builds a listing from pre-scanned entries (e.g. after sorting).
    pub fn from_entries(path: PathBuf, entries: Vec<Entry>) -> Self {
        Self {
            path,
            exists: true,
            entries,
            partition: OnceLock::new(),
        }
    }

    /// Returns the path this listing was scanned from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `false` when the scan failed.
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Returns all entries in scan order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the subdirectory entries.
    pub fn directories(&self) -> Vec<&Entry> {
        self.view(|p| &p.directories)
    }

    /// Returns the file entries (images included).
    pub fn files(&self) -> Vec<&Entry> {
        self.view(|p| &p.files)
    }

    /// Returns the image entries.
    pub fn images(&self) -> Vec<&Entry> {
        self.view(|p| &p.images)
    }

    /// Returns `true` if the listing contains at least one subdirectory.
    pub fn has_directories(&self) -> bool {
        !self.partition().directories.is_empty()
    }

    /// Returns `true` if the listing contains at least one image.
    pub fn has_images(&self) -> bool {
        !self.partition().images.is_empty()
    }

    fn view(&self, pick: impl Fn(&Partition) -> &Vec<usize>) -> Vec<&Entry> {
        pick(self.partition())
            .iter()
            .map(|&i| &self.entries[i])
            .collect()
    }

    fn partition(&self) -> &Partition {
        self.partition.get_or_init(|| {
            let mut partition = Partition::default();
            for (i, entry) in self.entries.iter().enumerate() {
                if entry.is_dir() {
                    partition.directories.push(i);
                } else {
                    partition.files.push(i);
                    if entry.is_image() {
                        partition.images.push(i);
                    }
                }
            }
            partition
        })
    }
}
