//! Organization: model-server records, their on-disk cache, and the
//! HTTP client that computes them.

pub mod cache;
pub mod client;
pub mod record;

pub use cache::{default_cache_dir, OrganizationCache};
pub use client::{ModelServerClient, OrganizeError, Organizer};
pub use record::{OrganizationRecord, OrganizedImage};
