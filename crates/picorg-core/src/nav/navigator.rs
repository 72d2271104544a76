//! The navigator: composition root for browsing a photo tree.
//!
//! A [`Navigator`] owns the navigation [`History`], the current
//! [`DirectoryListing`], the in-memory organization view, the on-disk
//! [`OrganizationCache`] and the [`Organizer`] client. All dependencies
//! are injected through the constructor; there is no global state.
//!
//! Every navigation follows the same protocol: update history, rescan
//! the target, apply the configured hidden-filter and sort, reset the
//! organization view, and return the new listing as the completion
//! signal for the presentation layer.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::event::{Command, Event};
use crate::fs::listing::DirectoryListing;
use crate::nav::filter::{filter_hidden, sort_entries, SortDirection, SortField};
use crate::nav::history::History;
use crate::org::cache::OrganizationCache;
use crate::org::client::{ModelServerClient, Organizer};
use crate::org::record::OrganizationRecord;

/// Receipt for an outstanding organize request.
///
/// Created by [`Navigator::organize_target`] and redeemed with
/// [`Navigator::apply_organization`]. The ticket pins the directory the
/// request was issued for, so a response that arrives after the user has
/// navigated elsewhere is recognised as stale.
#[derive(Debug)]
pub struct OrganizeTicket {
    path: PathBuf,
}

impl OrganizeTicket {
    /// The directory the organization was requested for.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What [`Navigator::apply_organization`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeOutcome {
    /// The record now backs the organization view.
    Applied,
    /// The directory changed while the request was in flight; the
    /// result (success or failure) was dropped.
    Stale,
}

/// Coordinates history, directory scanning and the organization cache
/// in response to user navigation actions.
///
/// One navigator serves one browsing surface. Navigation itself is
/// cheap and synchronous; only the organize call is async, and at most
/// one organize request may be in flight per navigator.
#[derive(Debug)]
pub struct Navigator<O: Organizer> {
    home: PathBuf,
    config: Config,
    history: History,
    listing: Option<DirectoryListing>,
    organization: Option<OrganizationRecord>,
    cache: OrganizationCache,
    organizer: O,
    in_flight: Option<PathBuf>,
}

impl<O: Organizer> Navigator<O> {
    /// Creates a navigator with default configuration.
    pub fn new(home: PathBuf, cache: OrganizationCache, organizer: O) -> Self {
        Self::with_config(home, Config::default(), cache, organizer)
    }

    /// Creates a navigator with explicit configuration.
    pub fn with_config(home: PathBuf, config: Config, cache: OrganizationCache, organizer: O) -> Self {
        Self {
            home,
            config,
            history: History::new(),
            listing: None,
            organization: None,
            cache,
            organizer,
            in_flight: None,
        }
    }

    /// Returns the home directory this navigator starts from.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Returns the configuration in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the current directory, unset before the first navigation.
    pub fn current_dir(&self) -> Option<&Path> {
        self.history.current()
    }

    /// Returns the current listing, unset before the first navigation.
    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.listing.as_ref()
    }

    /// Returns the organization view for the current directory, if one
    /// has been applied since the last navigation.
    pub fn organization(&self) -> Option<&OrganizationRecord> {
        self.organization.as_ref()
    }

    /// Returns the organization cache (e.g. for direct fetches by a UI
    /// layer driving the ticket flow itself).
    pub fn cache(&self) -> &OrganizationCache {
        &self.cache
    }

    /// Returns `true` if back-navigation is possible.
    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    /// Returns `true` if forward-navigation is possible.
    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Navigates into `path`, pushing a history entry.
    pub fn go_to(&mut self, path: PathBuf) -> &DirectoryListing {
        let history = self.history.push(path.clone());
        let listing = self.load_listing(&path);
        self.apply_navigation(history, listing)
    }

    /// Navigates to the home directory.
    pub fn go_home(&mut self) -> &DirectoryListing {
        let home = self.home.clone();
        self.go_to(home)
    }

    /// Re-reads the current directory, reusing the current history entry
    /// (refreshing never grows the back stack). Before the first
    /// navigation this behaves as [`Navigator::go_home`].
    pub fn refresh(&mut self) -> &DirectoryListing {
        match self.history.current().map(Path::to_path_buf) {
            Some(current) => {
                let history = self.history.clone();
                let listing = self.load_listing(&current);
                self.apply_navigation(history, listing)
            }
            None => self.go_home(),
        }
    }

    /// Navigates to the parent directory, pushing a new history entry.
    /// At a filesystem root this degrades to a refresh; before the first
    /// navigation it behaves as [`Navigator::go_home`].
    pub fn go_parent(&mut self) -> &DirectoryListing {
        let Some(current) = self.history.current().map(Path::to_path_buf) else {
            return self.go_home();
        };
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.go_to(parent.to_path_buf()),
            _ => self.refresh(),
        }
    }

    /// Navigates backward in history.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptyHistory`] if there is nothing to go back to;
    /// state is left unchanged.
    pub fn go_back(&mut self) -> CoreResult<&DirectoryListing> {
        let (history, target) = self.history.go_back().ok_or(CoreError::EmptyHistory)?;
        let listing = self.load_listing(&target);
        Ok(self.apply_navigation(history, listing))
    }

    /// Navigates forward in history.
    ///
    /// # Errors
    ///
    /// [`CoreError::EmptyHistory`] if there is nothing to go forward to;
    /// state is left unchanged.
    pub fn go_forward(&mut self) -> CoreResult<&DirectoryListing> {
        let (history, target) = self.history.go_forward().ok_or(CoreError::EmptyHistory)?;
        let listing = self.load_listing(&target);
        Ok(self.apply_navigation(history, listing))
    }

    /// Enables or disables the organization view.
    ///
    /// Enabling fetches the organization for the current directory,
    /// reusing the cache when possible. Disabling only clears the
    /// in-memory view; the cache file stays. A fetch failure leaves the
    /// listing and history untouched.
    pub async fn toggle_organize(&mut self, enable: bool) -> CoreResult<Option<&OrganizationRecord>> {
        if !enable {
            self.organization = None;
            return Ok(None);
        }
        let record = self.organize(false).await?;
        Ok(Some(record))
    }

    /// Recomputes the organization for the current directory, replacing
    /// any cached record.
    pub async fn reorganize(&mut self) -> CoreResult<&OrganizationRecord> {
        self.organize(true).await
    }

    /// Begins an organize request for the current directory.
    ///
    /// The ticket must be redeemed with [`Navigator::apply_organization`]
    /// (or abandoned via [`Navigator::cancel_organize`]).
    ///
    /// # Errors
    ///
    /// - [`CoreError::NoCurrentDirectory`] before the first navigation.
    /// - [`CoreError::OrganizeBusy`] while another ticket is outstanding.
    pub fn organize_target(&mut self) -> CoreResult<OrganizeTicket> {
        if self.in_flight.is_some() {
            return Err(CoreError::OrganizeBusy);
        }
        let path = self
            .history
            .current()
            .map(Path::to_path_buf)
            .ok_or(CoreError::NoCurrentDirectory)?;
        self.in_flight = Some(path.clone());
        Ok(OrganizeTicket { path })
    }

    /// Applies the result of an organize request.
    ///
    /// If the current directory no longer matches the ticket the result
    /// is dropped — errors included — and `Ok(Stale)` is returned. An
    /// error for a still-current directory is propagated and leaves the
    /// navigation state unchanged.
    pub fn apply_organization(
        &mut self,
        ticket: OrganizeTicket,
        result: CoreResult<OrganizationRecord>,
    ) -> CoreResult<OrganizeOutcome> {
        self.in_flight = None;
        if self.history.current() != Some(ticket.path.as_path()) {
            return Ok(OrganizeOutcome::Stale);
        }
        self.organization = Some(result?);
        Ok(OrganizeOutcome::Applied)
    }

    /// Abandons an outstanding organize ticket.
    pub fn cancel_organize(&mut self) {
        self.in_flight = None;
    }

    /// Returns `true` while an organize ticket is outstanding.
    pub fn organize_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Processes one UI command and returns the resulting event.
    pub async fn dispatch(&mut self, command: Command) -> CoreResult<Event> {
        match command {
            Command::Navigate(path) => Ok(loaded_event(self.go_to(path))),
            Command::GoHome => Ok(loaded_event(self.go_home())),
            Command::GoUp => Ok(loaded_event(self.go_parent())),
            Command::GoBack => Ok(loaded_event(self.go_back()?)),
            Command::GoForward => Ok(loaded_event(self.go_forward()?)),
            Command::Refresh => Ok(loaded_event(self.refresh())),
            Command::Organize { force } => {
                let record = self.organize(force).await?.clone();
                let path = self
                    .history
                    .current()
                    .map(Path::to_path_buf)
                    .ok_or(CoreError::NoCurrentDirectory)?;
                Ok(Event::OrganizationReady { path, record })
            }
            Command::ClearOrganization => {
                self.organization = None;
                Ok(Event::OrganizationCleared)
            }
        }
    }

    async fn organize(&mut self, force_refresh: bool) -> CoreResult<&OrganizationRecord> {
        let ticket = self.organize_target()?;
        let result = self
            .cache
            .fetch(&ticket.path, force_refresh, &self.organizer)
            .await;
        match self.apply_organization(ticket, result)? {
            OrganizeOutcome::Applied => self
                .organization
                .as_ref()
                .ok_or_else(|| CoreError::Organize("organization view missing after apply".into())),
            OrganizeOutcome::Stale => Err(CoreError::Organize(
                "directory changed while organizing".into(),
            )),
        }
    }

    /// Scans `path` and applies the configured hidden-filter and sort.
    fn load_listing(&self, path: &Path) -> DirectoryListing {
        let scanned = DirectoryListing::scan(path);
        if !scanned.exists() {
            return scanned;
        }

        let mut entries = scanned.entries().to_vec();
        if !self.config.general.show_hidden {
            entries = filter_hidden(&entries);
        }
        let field = SortField::parse(&self.config.general.default_sort).unwrap_or(SortField::Name);
        let direction = if self.config.general.sort_descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        let entries = sort_entries(
            &entries,
            field,
            direction,
            self.config.general.sort_dirs_first,
        );
        DirectoryListing::from_entries(path.to_path_buf(), entries)
    }

    fn apply_navigation(
        &mut self,
        history: History,
        listing: DirectoryListing,
    ) -> &DirectoryListing {
        self.history = history;
        self.organization = None;
        &*self.listing.insert(listing)
    }
}

impl Navigator<ModelServerClient> {
    /// Wires a navigator from configuration: the model-server client
    /// from `[organize].server_url` and the cache from
    /// `[organize].cache_dir` (defaulting to the user cache location).
    pub fn from_config(home: PathBuf, config: Config) -> Self {
        let cache_dir = config
            .organize
            .cache_dir
            .clone()
            .unwrap_or_else(crate::org::cache::default_cache_dir);
        let client = ModelServerClient::new(config.organize.server_url.clone());
        Self::with_config(home, config, OrganizationCache::new(cache_dir), client)
    }
}

fn loaded_event(listing: &DirectoryListing) -> Event {
    Event::DirectoryLoaded {
        path: listing.path().to_path_buf(),
        exists: listing.exists(),
        entries: listing.entries().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::org::client::OrganizeError;
    use crate::org::record::OrganizedImage;

    struct StubOrganizer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubOrganizer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Organizer for StubOrganizer {
        async fn organize(&self, dir: &Path) -> Result<OrganizationRecord, OrganizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(OrganizeError::ConnectionFailed("refused".to_string()));
            }
            Ok(OrganizationRecord {
                clusters: vec![vec![OrganizedImage {
                    path: dir.join("a.jpg"),
                    rating: 4.0,
                    cluster: 0,
                }]],
            })
        }
    }

    struct Fixture {
        home: TempDir,
        cache_dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let home = TempDir::new().unwrap();
            fs::write(home.path().join("a.jpg"), "img").unwrap();
            fs::write(home.path().join("b.txt"), "txt").unwrap();
            fs::create_dir(home.path().join("Pictures")).unwrap();
            fs::write(home.path().join("Pictures").join("c.png"), "img").unwrap();
            Self {
                home,
                cache_dir: TempDir::new().unwrap(),
            }
        }

        fn navigator(&self, organizer: StubOrganizer) -> Navigator<StubOrganizer> {
            Navigator::new(
                self.home.path().to_path_buf(),
                OrganizationCache::new(self.cache_dir.path().to_path_buf()),
                organizer,
            )
        }
    }

    #[test]
    fn starts_with_no_current_directory() {
        let fx = Fixture::new();
        let nav = fx.navigator(StubOrganizer::new());

        assert!(nav.current_dir().is_none());
        assert!(nav.listing().is_none());
        assert!(nav.organization().is_none());
        assert!(!nav.can_go_back());
    }

    #[test]
    fn go_home_then_into_pictures_and_back() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());

        nav.go_home();
        assert_eq!(nav.current_dir(), Some(fx.home.path()));

        let pictures = fx.home.path().join("Pictures");
        let listing = nav.go_to(pictures.clone());
        assert!(listing.exists());
        assert!(listing.has_images());
        assert_eq!(nav.current_dir(), Some(pictures.as_path()));
        assert!(nav.can_go_back());

        nav.go_back().unwrap();
        assert_eq!(nav.current_dir(), Some(fx.home.path()));
        assert!(nav.can_go_forward());

        nav.go_forward().unwrap();
        assert_eq!(nav.current_dir(), Some(pictures.as_path()));
    }

    #[test]
    fn go_back_on_empty_history_fails_and_leaves_state() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        let err = nav.go_back().unwrap_err();
        assert!(matches!(err, CoreError::EmptyHistory));
        assert_eq!(nav.current_dir(), Some(fx.home.path()));

        let err = nav.go_forward().unwrap_err();
        assert!(matches!(err, CoreError::EmptyHistory));
    }

    #[test]
    fn go_to_missing_directory_yields_nonexistent_listing() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());

        let listing = nav.go_to(PathBuf::from("/no/such/place"));
        assert!(!listing.exists());
        assert!(listing.entries().is_empty());
        // The navigation itself still happened.
        assert_eq!(nav.current_dir(), Some(Path::new("/no/such/place")));
    }

    #[test]
    fn refresh_does_not_grow_history() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        nav.refresh();
        assert!(!nav.can_go_back());
        assert_eq!(nav.current_dir(), Some(fx.home.path()));
    }

    #[test]
    fn refresh_before_first_navigation_goes_home() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());

        nav.refresh();
        assert_eq!(nav.current_dir(), Some(fx.home.path()));
    }

    #[test]
    fn go_parent_pushes_a_history_entry() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        let pictures = fx.home.path().join("Pictures");
        nav.go_to(pictures.clone());

        nav.go_parent();
        assert_eq!(nav.current_dir(), Some(fx.home.path()));
        assert!(nav.can_go_back());

        nav.go_back().unwrap();
        assert_eq!(nav.current_dir(), Some(pictures.as_path()));
    }

    #[test]
    fn listing_respects_hidden_filter_and_sort() {
        let fx = Fixture::new();
        fs::write(fx.home.path().join(".secret.jpg"), "img").unwrap();
        let mut nav = fx.navigator(StubOrganizer::new());

        let listing = nav.go_home();
        let names: Vec<&str> = listing.entries().iter().map(|e| e.name()).collect();
        // Directories first, then files sorted by name; hidden dropped.
        assert_eq!(names, vec!["Pictures", "a.jpg", "b.txt"]);
    }

    #[tokio::test]
    async fn toggle_organize_uses_cache_after_first_fetch() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        let record = nav.toggle_organize(true).await.unwrap().unwrap();
        assert_eq!(record.cluster_count(), 1);
        assert_eq!(nav.organizer.calls(), 1);

        nav.toggle_organize(false).await.unwrap();
        assert!(nav.organization().is_none());

        nav.toggle_organize(true).await.unwrap();
        assert!(nav.organization().is_some());
        assert_eq!(nav.organizer.calls(), 1);
    }

    #[tokio::test]
    async fn reorganize_forces_a_recompute() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        nav.toggle_organize(true).await.unwrap();
        nav.reorganize().await.unwrap();
        assert_eq!(nav.organizer.calls(), 2);
    }

    #[tokio::test]
    async fn organize_failure_leaves_navigation_intact() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::failing());
        nav.go_home();

        let err = nav.toggle_organize(true).await.unwrap_err();
        assert!(matches!(err, CoreError::Organize(_)));
        assert!(nav.organization().is_none());

        // Still navigable.
        let listing = nav.listing().unwrap();
        assert!(listing.exists());
        nav.go_to(fx.home.path().join("Pictures"));
        assert!(nav.can_go_back());
    }

    #[tokio::test]
    async fn organize_before_first_navigation_fails() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());

        let err = nav.toggle_organize(true).await.unwrap_err();
        assert!(matches!(err, CoreError::NoCurrentDirectory));
    }

    #[test]
    fn navigation_resets_organization_view() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();
        nav.organization = Some(OrganizationRecord::default());

        nav.go_to(fx.home.path().join("Pictures"));
        assert!(nav.organization().is_none());
    }

    #[test]
    fn stale_organize_result_is_dropped() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        let ticket = nav.organize_target().unwrap();
        assert!(nav.organize_in_flight());

        // User navigates away before the response lands.
        nav.go_to(fx.home.path().join("Pictures"));

        let outcome = nav
            .apply_organization(ticket, Ok(OrganizationRecord::default()))
            .unwrap();
        assert_eq!(outcome, OrganizeOutcome::Stale);
        assert!(nav.organization().is_none());
        assert!(!nav.organize_in_flight());
    }

    #[test]
    fn stale_organize_error_is_swallowed() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        let ticket = nav.organize_target().unwrap();
        nav.go_to(fx.home.path().join("Pictures"));

        let outcome = nav
            .apply_organization(ticket, Err(CoreError::Organize("late failure".into())))
            .unwrap();
        assert_eq!(outcome, OrganizeOutcome::Stale);
    }

    #[test]
    fn current_path_organize_result_is_applied() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        let ticket = nav.organize_target().unwrap();
        let outcome = nav
            .apply_organization(ticket, Ok(OrganizationRecord::default()))
            .unwrap();
        assert_eq!(outcome, OrganizeOutcome::Applied);
        assert!(nav.organization().is_some());
    }

    #[test]
    fn overlapping_organize_requests_are_rejected() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        let _ticket = nav.organize_target().unwrap();
        let err = nav.organize_target().unwrap_err();
        assert!(matches!(err, CoreError::OrganizeBusy));

        nav.cancel_organize();
        assert!(nav.organize_target().is_ok());
    }

    #[tokio::test]
    async fn dispatch_navigate_and_organize() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());

        let event = nav
            .dispatch(Command::Navigate(fx.home.path().to_path_buf()))
            .await
            .unwrap();
        match event {
            Event::DirectoryLoaded { path, exists, entries } => {
                assert_eq!(path, fx.home.path());
                assert!(exists);
                assert!(!entries.is_empty());
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let event = nav
            .dispatch(Command::Organize { force: false })
            .await
            .unwrap();
        match event {
            Event::OrganizationReady { path, record } => {
                assert_eq!(path, fx.home.path());
                assert_eq!(record.image_count(), 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let event = nav.dispatch(Command::ClearOrganization).await.unwrap();
        assert!(matches!(event, Event::OrganizationCleared));
        assert!(nav.organization().is_none());
    }

    #[tokio::test]
    async fn dispatch_go_back_on_empty_errors() {
        let fx = Fixture::new();
        let mut nav = fx.navigator(StubOrganizer::new());
        nav.go_home();

        let err = nav.dispatch(Command::GoBack).await.unwrap_err();
        assert!(matches!(err, CoreError::EmptyHistory));
    }

    #[test]
    fn from_config_wires_cache_dir_and_server_url() {
        let tmp = TempDir::new().unwrap();
        let config: Config = toml::from_str(&format!(
            "[organize]\nserver_url = \"http://gpu-box:5000/\"\ncache_dir = \"{}\"\n",
            tmp.path().display()
        ))
        .unwrap();

        let nav = Navigator::from_config(PathBuf::from("/home/user"), config);
        assert_eq!(nav.organizer.base_url(), "http://gpu-box:5000");
        assert!(nav
            .cache()
            .cache_file(Path::new("/x"))
            .starts_with(tmp.path()));
    }
}
