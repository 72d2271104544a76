//! File system abstractions for picorg.
//!
//! Provides the immutable [`entry::Entry`] value and single-shot
//! directory scans via [`listing::DirectoryListing`].

pub mod entry;
pub mod listing;

pub use entry::{Entry, IMAGE_EXTENSIONS};
pub use listing::DirectoryListing;
