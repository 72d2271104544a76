//! picorg core library — UI-agnostic photo browsing and organization logic.
//!
//! `picorg-core` provides the foundational types for building a photo
//! browser frontend: directory scanning with image classification,
//! browser-style navigation history, and a per-directory cache of
//! clustering/rating assignments computed by an external model server.
//! It is intentionally decoupled from any UI framework.
//!
//! # Modules
//!
//! - [`fs`] — File system abstractions: [`Entry`], single-shot directory scans.
//! - [`nav`] — Navigation: history, listing sort/filter, and the [`Navigator`] composition root.
//! - [`org`] — Organization: model-server records, their on-disk cache, and the HTTP client.
//! - [`config`] — User-facing configuration (TOML-based settings).
//! - [`event`] — Command and event types for UI ↔ Core communication.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;
pub mod org;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use fs::entry::{Entry, IMAGE_EXTENSIONS};
pub use fs::listing::DirectoryListing;
pub use nav::filter::{filter_hidden, sort_entries, SortDirection, SortField};
pub use nav::history::History;
pub use nav::navigator::{Navigator, OrganizeOutcome, OrganizeTicket};
pub use org::cache::{default_cache_dir, OrganizationCache};
pub use org::client::{ModelServerClient, OrganizeError, Organizer};
pub use org::record::{OrganizationRecord, OrganizedImage};
