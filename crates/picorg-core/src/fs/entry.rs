//! File entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

/// Extensions (lowercase, without the leading dot) treated as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "bmp", "apng", "avif"];

/// A single file or directory entry.
///
/// `Entry` is immutable — it captures the result of one metadata read and
/// is never updated afterwards. Classification (directory / file / image)
/// is a pure function of the captured type flag and lowercase extension.
///
/// # Examples
///
/// ```no_run
/// use picorg_core::Entry;
/// use std::fs;
///
/// let metadata = fs::metadata("photo.jpg").unwrap();
/// let entry = Entry::new("photo.jpg".into(), &metadata);
/// assert!(entry.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: PathBuf,
    name: String,
    extension: String,
    size: u64,
    modified: Option<SystemTime>,
    is_dir: bool,
    is_hidden: bool,
}

impl Entry {
    /// Creates a new `Entry` from a path and its metadata.
    ///
    /// Names are NFC-normalized (macOS stores filenames decomposed).
    /// Hidden entries are detected by a leading `.` in the name.
    /// Directory sizes are reported as `0`.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let is_hidden = name.starts_with('.');

        Self {
            path,
            name,
            extension,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
            is_dir: metadata.is_dir(),
            is_hidden,
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file or directory name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lowercased extension without the leading dot.
    /// Empty when the name has no extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last-modified time, if available.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if this entry is a regular file (not a directory).
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns `true` for files whose extension is in [`IMAGE_EXTENSIONS`].
    pub fn is_image(&self) -> bool {
        self.is_file() && IMAGE_EXTENSIONS.contains(&self.extension.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry_for(tmp: &TempDir, name: &str) -> Entry {
        let path = tmp.path().join(name);
        fs::write(&path, "data").unwrap();
        let metadata = fs::metadata(&path).unwrap();
        Entry::new(path, &metadata)
    }

    #[test]
    fn entry_from_regular_file() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_for(&tmp, "notes.txt");

        assert_eq!(entry.name(), "notes.txt");
        assert_eq!(entry.extension(), "txt");
        assert_eq!(entry.size(), 4);
        assert!(entry.is_file());
        assert!(!entry.is_dir());
        assert!(!entry.is_hidden());
        assert!(!entry.is_image());
        assert!(entry.modified().is_some());
    }

    #[test]
    fn entry_from_directory() {
        let tmp = TempDir::new().unwrap();
        let dir_path = tmp.path().join("album");
        fs::create_dir(&dir_path).unwrap();

        let metadata = fs::metadata(&dir_path).unwrap();
        let entry = Entry::new(dir_path, &metadata);

        assert!(entry.is_dir());
        assert!(!entry.is_file());
        assert_eq!(entry.size(), 0);
        assert!(!entry.is_image());
    }

    #[test]
    fn image_extensions_classify_as_images() {
        let tmp = TempDir::new().unwrap();
        for name in [
            "a.jpeg", "b.jpg", "c.png", "d.gif", "e.bmp", "f.apng", "g.avif",
        ] {
            let entry = entry_for(&tmp, name);
            assert!(entry.is_image(), "{name} should be an image");
        }
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_for(&tmp, "shout.PNG");

        assert_eq!(entry.extension(), "png");
        assert!(entry.is_image());
    }

    #[test]
    fn non_image_extensions_are_plain_files() {
        let tmp = TempDir::new().unwrap();
        for name in ["a.txt", "b.pdf", "c.webp", "noext"] {
            let entry = entry_for(&tmp, name);
            assert!(!entry.is_image(), "{name} should not be an image");
        }
    }

    #[test]
    fn directory_named_like_image_is_not_image() {
        let tmp = TempDir::new().unwrap();
        let dir_path = tmp.path().join("holiday.jpg");
        fs::create_dir(&dir_path).unwrap();

        let metadata = fs::metadata(&dir_path).unwrap();
        let entry = Entry::new(dir_path, &metadata);

        assert!(entry.is_dir());
        assert!(!entry.is_image());
    }

    #[test]
    fn hidden_file_detected() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_for(&tmp, ".thumbnails");
        assert!(entry.is_hidden());
    }

    #[test]
    fn file_without_extension_has_empty_extension() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_for(&tmp, "README");
        assert_eq!(entry.extension(), "");
    }

    #[test]
    fn unicode_name_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_for(&tmp, "사진.png");
        assert_eq!(entry.name(), "사진.png");
        assert!(entry.is_image());
    }

    #[test]
    fn entry_clone_and_eq() {
        let tmp = TempDir::new().unwrap();
        let entry = entry_for(&tmp, "x.gif");
        let cloned = entry.clone();
        assert_eq!(entry, cloned);
    }
}
