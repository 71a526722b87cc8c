use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::time::Instant;

use crate::cache::CacheStore;
use crate::catalog::{
    CredentialProvider, DestinationCatalog, DestinationItem, DestinationPlaylist, SourceCatalog,
    Track,
};
use crate::error::TransferError;
use crate::matching::Snapshot;
use crate::resolver::{Resolution, Resolver};

pub const PLAYLIST_TITLE_PREFIX: &str = "TuneShift: ";
pub const PLAYLIST_DESCRIPTION: &str = "Transferred from Spotify using TuneShift.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Pause after every track that cost a search or an insert
    pub track_delay: Duration,
    /// Wall-clock limit of a whole run, checked between tracks
    pub time_budget: Option<Duration>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            track_delay: Duration::from_millis(100),
            time_budget: Some(Duration::from_secs(60)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    Success,
    AlreadyExists,
    NotFound,
    Failed,
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::AlreadyExists => "already_exists",
            Self::NotFound => "not_found",
            Self::Failed => "failed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackResult {
    pub name: String,
    pub status: TransferStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub destination_playlist_id: String,
    /// One entry per input track, in input order
    pub results: Vec<TrackResult>,
    pub processed_count: usize,
}

impl TransferReport {
    fn new(destination_playlist_id: &str, results: Vec<TrackResult>) -> Self {
        Self {
            destination_playlist_id: destination_playlist_id.to_owned(),
            processed_count: results.len(),
            results,
        }
    }

    pub fn count(&self, status: TransferStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// Dry-run verdict for one track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedTrack {
    AlreadyExists,
    Cached(String),
    NeedsSearch,
}

struct Outcome {
    status: TransferStatus,
    /// A search or an insert was issued
    throttled: bool,
}

/// Reads every page of a playlist. A failing page ends the walk with what was collected so
/// far, which only risks missing a local match.
pub async fn load_snapshot(destination: &dyn DestinationCatalog, playlist_id: &str) -> Snapshot {
    let mut items = Vec::new();
    let mut page_token = None;
    loop {
        let page = match destination.list_items(playlist_id, page_token.take()).await {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(
                    playlist_id,
                    loaded = items.len(),
                    "failed to list playlist items, continuing with partial snapshot: {err:#}"
                );
                break;
            }
        };
        items.extend(page.items);
        match page.next_page_token.filter(|token| !token.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }
    tracing::debug!(playlist_id, items = items.len(), "loaded destination snapshot");
    Snapshot::new(items)
}

/// Reuses the destination playlist named after the source playlist, or creates it.
pub async fn prepare_destination(
    destination: &dyn DestinationCatalog,
    source_title: &str,
) -> Result<DestinationPlaylist> {
    let title = format!("{PLAYLIST_TITLE_PREFIX}{source_title}");
    if let Some(playlist) = destination
        .find_playlist_by_title(&title)
        .await
        .context("Failed to look up destination playlist")?
    {
        tracing::info!(id = %playlist.id, %title, "found existing playlist");
        return Ok(playlist);
    }
    let playlist = destination
        .create_playlist(&title, PLAYLIST_DESCRIPTION)
        .await
        .context("Failed to create destination playlist")?;
    tracing::info!(id = %playlist.id, %title, "created playlist");
    Ok(playlist)
}

/// Drives tracks one by one through local match, cache, search and insertion.
pub struct Transfer<'a> {
    destination: &'a dyn DestinationCatalog,
    resolver: Resolver<'a>,
    options: TransferOptions,
}

impl<'a> Transfer<'a> {
    pub fn new(
        destination: &'a dyn DestinationCatalog,
        cache: &'a dyn CacheStore,
        options: TransferOptions,
    ) -> Self {
        Self {
            destination,
            resolver: Resolver::new(cache, destination),
            options,
        }
    }

    /// Processes `tracks` in order against a fresh snapshot of the playlist, stopping between
    /// tracks once `deadline` has passed.
    pub async fn run(
        &self,
        playlist_id: &str,
        tracks: &[Track],
        deadline: Option<Instant>,
    ) -> Result<TransferReport, TransferError> {
        let mut snapshot = load_snapshot(self.destination, playlist_id).await;
        let mut results = Vec::with_capacity(tracks.len());
        for (index, track) in tracks.iter().enumerate() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                tracing::warn!(processed = index, total = tracks.len(), "time budget exceeded");
                return Err(TransferError::TimedOut {
                    report: Box::new(TransferReport::new(playlist_id, results)),
                    total: tracks.len(),
                });
            }

            let outcome = self.process_track(playlist_id, track, &mut snapshot).await;
            tracing::info!(track = %track.name, artist = %track.artist, status = %outcome.status);
            results.push(TrackResult {
                name: track.name.clone(),
                status: outcome.status,
            });

            if outcome.throttled && index + 1 < tracks.len() {
                tokio::time::sleep(self.options.track_delay).await;
            }
        }
        Ok(TransferReport::new(playlist_id, results))
    }

    async fn process_track(
        &self,
        playlist_id: &str,
        track: &Track,
        snapshot: &mut Snapshot,
    ) -> Outcome {
        if let Some(item) = snapshot.find_match(track) {
            tracing::debug!(track = %track.name, title = %item.title, "matched existing item");
            return Outcome {
                status: TransferStatus::AlreadyExists,
                throttled: false,
            };
        }

        let resolution = self.resolver.resolve(track).await;
        let searched = resolution.searched();
        let id = match resolution {
            Resolution::Cached(id) | Resolution::Found(id) => id,
            Resolution::NotFound => {
                return Outcome {
                    status: TransferStatus::NotFound,
                    throttled: searched,
                };
            }
            Resolution::Failed(reason) => {
                tracing::debug!(track = %track.name, %reason, "resolution failed");
                return Outcome {
                    status: TransferStatus::Failed,
                    throttled: searched,
                };
            }
        };

        if snapshot.contains_id(&id) {
            return Outcome {
                status: TransferStatus::AlreadyExists,
                throttled: searched,
            };
        }

        let status = match self.destination.add_item(playlist_id, &id).await {
            Ok(()) => {
                snapshot.push(DestinationItem {
                    external_id: id,
                    title: track.name.clone(),
                });
                TransferStatus::Success
            }
            Err(err) => {
                tracing::warn!(track = %track.name, %id, "failed to add item: {err:#}");
                TransferStatus::Failed
            }
        };
        Outcome {
            status,
            throttled: true,
        }
    }

    /// What a run would do, without searching or inserting anything.
    ///
    /// Cached identifiers are treated as added so duplicates further down are reported as
    /// already present.
    pub async fn plan(&self, mut snapshot: Snapshot, tracks: &[Track]) -> Vec<PlannedTrack> {
        let mut planned = Vec::with_capacity(tracks.len());
        for track in tracks {
            if snapshot.find_match(track).is_some() {
                planned.push(PlannedTrack::AlreadyExists);
                continue;
            }
            match self.resolver.cached(&track.signature()).await {
                Some(id) if snapshot.contains_id(&id) => planned.push(PlannedTrack::AlreadyExists),
                Some(id) => {
                    snapshot.push(DestinationItem {
                        external_id: id.clone(),
                        title: track.name.clone(),
                    });
                    planned.push(PlannedTrack::Cached(id));
                }
                None => planned.push(PlannedTrack::NeedsSearch),
            }
        }
        planned
    }
}

/// A complete run: credentials, source playlist, destination playlist, then every track.
pub async fn transfer_playlist(
    credentials: &dyn CredentialProvider,
    source: &dyn SourceCatalog,
    destination: &dyn DestinationCatalog,
    cache: &dyn CacheStore,
    playlist_url: &str,
    options: TransferOptions,
) -> Result<TransferReport, TransferError> {
    let deadline = options.time_budget.map(|budget| Instant::now() + budget);
    credentials.current_bearer_token()?;

    let playlist = source.fetch_playlist(playlist_url).await?;
    tracing::info!(
        title = %playlist.title,
        tracks = playlist.tracks.len(),
        total = playlist.total_count,
        "fetched source playlist"
    );
    let tracks: Vec<Track> = playlist.tracks.iter().map(|t| t.to_track()).collect();

    let target = prepare_destination(destination, &playlist.title)
        .await
        .map_err(TransferError::Destination)?;

    Transfer::new(destination, cache, options)
        .run(&target.id, &tracks, deadline)
        .await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::{anyhow, bail};
    use async_trait::async_trait;

    use super::*;
    use crate::cache::{CacheRecord, MemoryCache};
    use crate::catalog::{
        ItemsPage, MockCredentialProvider, MockSourceCatalog, SourcePlaylist, SourceTrack,
    };

    /// Destination catalog kept in memory, recording every call.
    #[derive(Default)]
    struct FakeDestination {
        state: Mutex<FakeState>,
    }

    #[derive(Default)]
    struct FakeState {
        playlists: Vec<DestinationPlaylist>,
        pages: Vec<Result<ItemsPage, String>>,
        search_results: HashMap<String, Result<Option<String>, String>>,
        failing_adds: Vec<String>,
        searches: Vec<String>,
        added: Vec<(String, String)>,
        list_calls: usize,
    }

    impl FakeDestination {
        fn with_pages(pages: Vec<Result<ItemsPage, String>>) -> Self {
            let fake = Self::default();
            fake.state.lock().unwrap().pages = pages;
            fake
        }

        fn search_returns(&self, query: &str, result: Result<Option<&str>, &str>) {
            self.state.lock().unwrap().search_results.insert(
                query.to_owned(),
                result.map(|id| id.map(str::to_owned)).map_err(str::to_owned),
            );
        }

        fn fail_add(&self, id: &str) {
            self.state.lock().unwrap().failing_adds.push(id.to_owned());
        }

        fn searches(&self) -> Vec<String> {
            self.state.lock().unwrap().searches.clone()
        }

        fn added(&self) -> Vec<(String, String)> {
            self.state.lock().unwrap().added.clone()
        }
    }

    #[async_trait]
    impl DestinationCatalog for FakeDestination {
        async fn find_playlist_by_title(&self, title: &str) -> Result<Option<DestinationPlaylist>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .playlists
                .iter()
                .find(|p| p.title == title)
                .cloned())
        }

        async fn create_playlist(
            &self,
            title: &str,
            _description: &str,
        ) -> Result<DestinationPlaylist> {
            let mut state = self.state.lock().unwrap();
            let playlist = DestinationPlaylist {
                id: format!("PL{}", state.playlists.len() + 1),
                title: title.to_owned(),
            };
            state.playlists.push(playlist.clone());
            Ok(playlist)
        }

        async fn list_items(
            &self,
            _playlist_id: &str,
            _page_token: Option<String>,
        ) -> Result<ItemsPage> {
            let mut state = self.state.lock().unwrap();
            let index = state.list_calls;
            state.list_calls += 1;
            match state.pages.get(index) {
                Some(Ok(page)) => Ok(page.clone()),
                Some(Err(message)) => Err(anyhow!("{message}")),
                None => Ok(ItemsPage::default()),
            }
        }

        async fn search_one(&self, query: &str) -> Result<Option<String>> {
            let mut state = self.state.lock().unwrap();
            state.searches.push(query.to_owned());
            match state.search_results.get(query) {
                Some(Ok(id)) => Ok(id.clone()),
                Some(Err(message)) => Err(anyhow!("{message}")),
                None => Ok(None),
            }
        }

        async fn add_item(&self, playlist_id: &str, item_id: &str) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            if state.failing_adds.iter().any(|id| id == item_id) {
                bail!("insert rejected");
            }
            state
                .added
                .push((playlist_id.to_owned(), item_id.to_owned()));
            Ok(())
        }
    }

    fn options() -> TransferOptions {
        TransferOptions {
            track_delay: Duration::ZERO,
            time_budget: None,
        }
    }

    fn item(external_id: &str, title: &str) -> DestinationItem {
        DestinationItem {
            external_id: external_id.to_owned(),
            title: title.to_owned(),
        }
    }

    fn statuses(report: &TransferReport) -> Vec<TransferStatus> {
        report.results.iter().map(|r| r.status).collect()
    }

    async fn cache_with(signature: &str, id: &str) -> MemoryCache {
        let cache = MemoryCache::new();
        cache
            .store(CacheRecord {
                signature: signature.to_owned(),
                resolved_id: id.to_owned(),
                title: None,
                created_at: chrono::Utc::now(),
            })
            .await
            .unwrap();
        cache
    }

    #[tokio::test]
    async fn test_duplicate_source_tracks_added_once() {
        let destination = FakeDestination::default();
        destination.search_returns("Midnight Aria", Ok(Some("V1")));
        let cache = MemoryCache::new();
        let tracks = vec![Track::new("Midnight", "Aria"), Track::new("Midnight", "Aria")];

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &tracks, None)
            .await
            .unwrap();

        assert_eq!(
            statuses(&report),
            vec![TransferStatus::Success, TransferStatus::AlreadyExists],
        );
        assert_eq!(report.processed_count, 2);
        assert_eq!(report.destination_playlist_id, "PL1");
        assert_eq!(destination.searches(), vec!["Midnight Aria".to_owned()]);
        assert_eq!(
            destination.added(),
            vec![("PL1".to_owned(), "V1".to_owned())],
        );
    }

    #[tokio::test]
    async fn test_exact_name_match_skips_search() {
        let destination =
            FakeDestination::with_pages(vec![Ok(ItemsPage {
                items: vec![item("V7", "Midnight (Official Video)")],
                next_page_token: None,
            })]);
        let cache = MemoryCache::new();

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &[Track::new("Midnight", "Aria")], None)
            .await
            .unwrap();

        assert_eq!(statuses(&report), vec![TransferStatus::AlreadyExists]);
        assert!(destination.searches().is_empty());
        assert!(destination.added().is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_is_not_found_and_not_cached() {
        let destination = FakeDestination::default();
        let cache = MemoryCache::new();

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &[Track::new("Unknown", "Nobody")], None)
            .await
            .unwrap();

        assert_eq!(statuses(&report), vec![TransferStatus::NotFound]);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_search_and_dedups_duplicate() {
        let destination = FakeDestination::default();
        let cache = cache_with("midnight aria", "V1").await;
        let tracks = vec![Track::new("Midnight", "Aria"), Track::new("Midnight", "Aria")];

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &tracks, None)
            .await
            .unwrap();

        assert_eq!(
            statuses(&report),
            vec![TransferStatus::Success, TransferStatus::AlreadyExists],
        );
        assert!(destination.searches().is_empty());
        assert_eq!(destination.added().len(), 1);
    }

    #[tokio::test]
    async fn test_resolved_id_already_in_playlist() {
        // Title too different for a local match, but the cached id is already there
        let destination = FakeDestination::with_pages(vec![Ok(ItemsPage {
            items: vec![item("V1", "Some Upload Title")],
            next_page_token: None,
        })]);
        let cache = cache_with("midnight aria", "V1").await;

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &[Track::new("Midnight", "Aria")], None)
            .await
            .unwrap();

        assert_eq!(statuses(&report), vec![TransferStatus::AlreadyExists]);
        assert!(destination.added().is_empty());
    }

    #[tokio::test]
    async fn test_search_error_is_failed_and_run_continues() {
        let destination = FakeDestination::default();
        destination.search_returns("Broken Song", Err("HTTP 403 quotaExceeded"));
        destination.search_returns("Midnight Aria", Ok(Some("V1")));
        let cache = MemoryCache::new();
        let tracks = vec![Track::new("Broken", "Song"), Track::new("Midnight", "Aria")];

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &tracks, None)
            .await
            .unwrap();

        assert_eq!(
            statuses(&report),
            vec![TransferStatus::Failed, TransferStatus::Success],
        );
        assert_eq!(cache.lookup("broken song").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_error_is_failed_and_snapshot_unchanged() {
        let destination = FakeDestination::default();
        destination.search_returns("Midnight Aria", Ok(Some("V1")));
        destination.fail_add("V1");
        let cache = MemoryCache::new();
        let tracks = vec![Track::new("Midnight", "Aria"), Track::new("Midnight", "Aria")];

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &tracks, None)
            .await
            .unwrap();

        // The second attempt is served from the cache and fails again on insert
        assert_eq!(
            statuses(&report),
            vec![TransferStatus::Failed, TransferStatus::Failed],
        );
        assert_eq!(destination.searches().len(), 1);
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        let destination = FakeDestination::with_pages(vec![Ok(ItemsPage {
            items: vec![item("V0", "Existing")],
            next_page_token: None,
        })]);
        destination.search_returns("New Band", Ok(Some("V2")));
        let cache = MemoryCache::new();
        let tracks = vec![
            Track::new("New", "Band"),
            Track::new("Existing", "Someone"),
            Track::new("Missing", "Nobody"),
        ];

        let report = Transfer::new(&destination, &cache, options())
            .run("PL1", &tracks, None)
            .await
            .unwrap();

        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Existing", "Missing"]);
        assert_eq!(
            statuses(&report),
            vec![
                TransferStatus::Success,
                TransferStatus::AlreadyExists,
                TransferStatus::NotFound,
            ],
        );
        assert_eq!(report.count(TransferStatus::Success), 1);
    }

    #[tokio::test]
    async fn test_load_snapshot_follows_pages() {
        let destination = FakeDestination::with_pages(vec![
            Ok(ItemsPage {
                items: vec![item("V1", "One")],
                next_page_token: Some("page2".to_owned()),
            }),
            Ok(ItemsPage {
                items: vec![item("V2", "Two")],
                next_page_token: None,
            }),
        ]);

        let snapshot = load_snapshot(&destination, "PL1").await;
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains_id("V1"));
        assert!(snapshot.contains_id("V2"));
    }

    #[tokio::test]
    async fn test_load_snapshot_keeps_partial_on_error() {
        let destination = FakeDestination::with_pages(vec![
            Ok(ItemsPage {
                items: vec![item("V1", "One")],
                next_page_token: Some("page2".to_owned()),
            }),
            Err("backend error".to_owned()),
            Ok(ItemsPage {
                items: vec![item("V3", "Three")],
                next_page_token: None,
            }),
        ]);

        let snapshot = load_snapshot(&destination, "PL1").await;
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_id("V1"));
        assert!(!snapshot.contains_id("V3"));
    }

    #[tokio::test]
    async fn test_time_budget_exceeded_returns_partial_report() {
        let destination = FakeDestination::default();
        let cache = MemoryCache::new();
        let transfer = Transfer::new(&destination, &cache, options());

        let result = transfer
            .run(
                "PL1",
                &[Track::new("Midnight", "Aria")],
                Some(Instant::now()),
            )
            .await;

        match result {
            Err(TransferError::TimedOut { report, total }) => {
                assert_eq!(total, 1);
                assert_eq!(report.processed_count, 0);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(destination.searches().is_empty());
    }

    #[tokio::test]
    async fn test_only_costly_paths_are_throttled() {
        let destination = FakeDestination::default();
        destination.search_returns("Found It", Ok(Some("V1")));
        let cache = cache_with("cached song", "V2").await;
        let transfer = Transfer::new(&destination, &cache, options());
        let mut snapshot = Snapshot::new([item("V0", "Local Song")]);

        let local = transfer
            .process_track("PL1", &Track::new("Local Song", "X"), &mut snapshot)
            .await;
        assert_eq!(local.status, TransferStatus::AlreadyExists);
        assert!(!local.throttled);

        let missing = transfer
            .process_track("PL1", &Track::new("Nothing", "Here"), &mut snapshot)
            .await;
        assert_eq!(missing.status, TransferStatus::NotFound);
        assert!(missing.throttled);

        let found = transfer
            .process_track("PL1", &Track::new("Found", "It"), &mut snapshot)
            .await;
        assert_eq!(found.status, TransferStatus::Success);
        assert!(found.throttled);

        let cached = transfer
            .process_track("PL1", &Track::new("Cached", "Song"), &mut snapshot)
            .await;
        assert_eq!(cached.status, TransferStatus::Success);
        assert!(cached.throttled);

        // Cache hit whose id is already present: no search, no insert
        let mut other_snapshot = Snapshot::new([item("V2", "Unrelated Upload")]);
        let cached_present = transfer
            .process_track("PL1", &Track::new("Cached", "Song"), &mut other_snapshot)
            .await;
        assert_eq!(cached_present.status, TransferStatus::AlreadyExists);
        assert!(!cached_present.throttled);
    }

    #[tokio::test]
    async fn test_plan_does_not_search_or_add() {
        let destination = FakeDestination::default();
        let cache = cache_with("cached song", "V2").await;
        let transfer = Transfer::new(&destination, &cache, options());
        let snapshot = Snapshot::new([item("V0", "Local Song")]);
        let tracks = vec![
            Track::new("Local Song", "X"),
            Track::new("Cached", "Song"),
            Track::new("Cached", "Song"),
            Track::new("Unknown", "Nobody"),
        ];

        let planned = transfer.plan(snapshot, &tracks).await;
        assert_eq!(
            planned,
            vec![
                PlannedTrack::AlreadyExists,
                PlannedTrack::Cached("V2".to_owned()),
                PlannedTrack::AlreadyExists,
                PlannedTrack::NeedsSearch,
            ],
        );
        assert!(destination.searches().is_empty());
        assert!(destination.added().is_empty());
    }

    #[tokio::test]
    async fn test_prepare_destination_reuses_existing() {
        let destination = FakeDestination::default();
        destination.state.lock().unwrap().playlists.push(DestinationPlaylist {
            id: "PLX".to_owned(),
            title: "TuneShift: Road Trip".to_owned(),
        });

        let playlist = prepare_destination(&destination, "Road Trip").await.unwrap();
        assert_eq!(playlist.id, "PLX");
        assert_eq!(destination.state.lock().unwrap().playlists.len(), 1);
    }

    #[tokio::test]
    async fn test_prepare_destination_creates_missing() {
        let destination = FakeDestination::default();

        let playlist = prepare_destination(&destination, "Road Trip").await.unwrap();
        assert_eq!(playlist.title, "TuneShift: Road Trip");
        assert_eq!(destination.state.lock().unwrap().playlists.len(), 1);
    }

    fn source_playlist() -> SourcePlaylist {
        SourcePlaylist {
            title: "Road Trip".to_owned(),
            description: None,
            cover_image: None,
            tracks: vec![SourceTrack {
                name: "Midnight".to_owned(),
                artist: "Aria".to_owned(),
                album: "Night".to_owned(),
                image: None,
                external_uri: "spotify:track:1".to_owned(),
            }],
            total_count: 1,
        }
    }

    #[tokio::test]
    async fn test_transfer_playlist_end_to_end() {
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_current_bearer_token()
            .returning(|| Ok("token".to_owned()));
        let mut source = MockSourceCatalog::new();
        source
            .expect_fetch_playlist()
            .times(1)
            .returning(|_| Ok(source_playlist()));
        let destination = FakeDestination::default();
        destination.search_returns("Midnight Aria", Ok(Some("V1")));
        let cache = MemoryCache::new();

        let report = transfer_playlist(
            &credentials,
            &source,
            &destination,
            &cache,
            "https://open.spotify.com/playlist/abc",
            options(),
        )
        .await
        .unwrap();

        assert_eq!(report.destination_playlist_id, "PL1");
        assert_eq!(statuses(&report), vec![TransferStatus::Success]);
        assert_eq!(
            cache.lookup("midnight aria").await.unwrap(),
            Some("V1".to_owned()),
        );
    }

    #[tokio::test]
    async fn test_transfer_playlist_unauthenticated_does_nothing() {
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_current_bearer_token()
            .returning(|| Err(TransferError::Unauthenticated));
        let mut source = MockSourceCatalog::new();
        source.expect_fetch_playlist().never();
        let destination = FakeDestination::default();
        let cache = MemoryCache::new();

        let result = transfer_playlist(
            &credentials,
            &source,
            &destination,
            &cache,
            "https://open.spotify.com/playlist/abc",
            options(),
        )
        .await;

        assert!(matches!(result, Err(TransferError::Unauthenticated)));
        assert!(destination.state.lock().unwrap().playlists.is_empty());
    }

    #[tokio::test]
    async fn test_transfer_playlist_invalid_input_aborts() {
        let mut credentials = MockCredentialProvider::new();
        credentials
            .expect_current_bearer_token()
            .returning(|| Ok("token".to_owned()));
        let mut source = MockSourceCatalog::new();
        source
            .expect_fetch_playlist()
            .returning(|url| Err(TransferError::InvalidInput(url.to_owned())));
        let destination = FakeDestination::default();
        let cache = MemoryCache::new();

        let result = transfer_playlist(
            &credentials,
            &source,
            &destination,
            &cache,
            "https://example.com/nothing",
            options(),
        )
        .await;

        assert!(matches!(result, Err(TransferError::InvalidInput(_))));
        assert!(destination.state.lock().unwrap().playlists.is_empty());
    }
}
