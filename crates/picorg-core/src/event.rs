//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s, which
//! [`crate::nav::navigator::Navigator::dispatch`] processes and answers
//! with [`Event`]s. Failures are returned as `CoreError` values, so the
//! presentation layer decides how to render them.

use std::path::PathBuf;

use crate::fs::entry::Entry;
use crate::org::record::OrganizationRecord;

/// An action the UI requests the core to perform.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
#[derive(Debug, Clone)]
pub enum Command {
    /// Navigate into the directory at the given path.
    Navigate(PathBuf),
    /// Navigate to the home directory.
    GoHome,
    /// Move to the parent directory.
    GoUp,
    /// Navigate backward in history.
    GoBack,
    /// Navigate forward in history.
    GoForward,
    /// Re-read the current directory.
    Refresh,
    /// Compute (or load from cache) the organization of the current
    /// directory. `force` bypasses and replaces the cached record.
    Organize { force: bool },
    /// Drop the in-memory organization view.
    ClearOrganization,
}

/// A notification the core sends back to the UI.
///
/// Events flow **Core → UI**. The UI uses these to update its display state.
#[derive(Debug, Clone)]
pub enum Event {
    /// A navigation completed and the listing was (re)loaded.
    DirectoryLoaded {
        /// The absolute path of the directory.
        path: PathBuf,
        /// Whether the directory could actually be read.
        exists: bool,
        /// The entries contained in the directory.
        entries: Vec<Entry>,
    },
    /// An organization is available for the current directory.
    OrganizationReady {
        /// The directory the record belongs to.
        path: PathBuf,
        /// The clustering/rating assignment.
        record: OrganizationRecord,
    },
    /// The organization view was cleared.
    OrganizationCleared,
}
