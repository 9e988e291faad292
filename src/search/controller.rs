//! Debounced, race-safe autocomplete controller.
//!
//! Each keystroke starts a new cycle: wait out the debounce interval, query
//! multi search and keyword search concurrently, then publish a merged
//! [`Dropdown`]. A generation counter identifies the current cycle; every
//! new keystroke bumps it and aborts the previous cycle's task, and results
//! are only published while their generation is still current.

use std::sync::Arc;

use cinetech_common::{MediaId, MediaKind};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::dropdown::{Dropdown, KeywordSuggestion, Limits, MediaSuggestion};
use crate::catalog::CatalogProvider;
use crate::config::SearchConfig;

/// Lifecycle of the current input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// Waiting out the debounce interval.
    Pending,
    /// Both searches in flight.
    Fetching,
    /// A dropdown for the latest query is shown.
    Displaying,
}

/// Snapshot published to subscribers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchView {
    pub phase: Phase,
    /// Trimmed text of the latest input.
    pub query: String,
    /// `None` when the dropdown is hidden.
    pub dropdown: Option<Dropdown>,
}

impl SearchView {
    pub fn is_visible(&self) -> bool {
        self.dropdown.is_some()
    }
}

/// Where the presentation layer should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Full results view for a query.
    SearchResults { query: String },
    /// Detail view of one title.
    Title { id: MediaId, kind: MediaKind },
}

#[derive(Debug, Default)]
struct Session {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Session {
    /// Invalidate the running cycle and return the new generation.
    fn supersede(&mut self) -> u64 {
        self.generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation
    }
}

struct Shared {
    provider: Arc<dyn CatalogProvider>,
    settings: SearchConfig,
    session: Mutex<Session>,
    view: watch::Sender<SearchView>,
}

/// Autocomplete state machine for one input stream.
///
/// Methods that start a cycle spawn onto the current tokio runtime and must
/// be called from within one.
pub struct SearchController {
    shared: Arc<Shared>,
}

impl SearchController {
    pub fn new(provider: Arc<dyn CatalogProvider>, settings: SearchConfig) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        Self {
            shared: Arc::new(Shared {
                provider,
                settings,
                session: Mutex::new(Session::default()),
                view,
            }),
        }
    }

    /// Receive every published [`SearchView`].
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.shared.view.subscribe()
    }

    /// Current snapshot.
    pub fn view(&self) -> SearchView {
        self.shared.view.borrow().clone()
    }

    /// Handle the input text changing.
    pub fn on_input(&self, text: &str) {
        let query = text.trim().to_string();
        let mut session = self.shared.session.lock();
        let generation = session.supersede();

        if query.chars().count() < self.shared.settings.min_query_len {
            debug!(generation, "Query below minimum length; hiding dropdown");
            self.shared.view.send_replace(SearchView {
                query,
                ..SearchView::default()
            });
            return;
        }

        self.shared.view.send_modify(|view| {
            view.phase = Phase::Pending;
            view.query = query.clone();
        });

        let shared = Arc::clone(&self.shared);
        session.pending = Some(tokio::spawn(async move {
            shared.run_cycle(generation, query).await;
        }));
    }

    /// Handle Enter. Returns the full results view for a long enough query,
    /// cancelling any pending cycle; `None` leaves the state untouched.
    pub fn on_submit(&self, text: &str) -> Option<Navigation> {
        let query = text.trim();
        if query.chars().count() < self.shared.settings.min_query_len {
            return None;
        }
        self.reset(query);
        Some(Navigation::SearchResults {
            query: query.to_string(),
        })
    }

    /// Outside click or navigation: cancel everything and hide the dropdown.
    pub fn dismiss(&self) {
        let query = self.shared.view.borrow().query.clone();
        self.reset(&query);
    }

    /// Follow a media suggestion to its detail view.
    pub fn select_media(&self, suggestion: &MediaSuggestion) -> Navigation {
        self.dismiss();
        Navigation::Title {
            id: suggestion.id,
            kind: suggestion.kind,
        }
    }

    /// Follow a keyword suggestion to the full results view.
    pub fn select_keyword(&self, suggestion: &KeywordSuggestion) -> Navigation {
        self.dismiss();
        Navigation::SearchResults {
            query: suggestion.name.clone(),
        }
    }

    fn reset(&self, query: &str) {
        let mut session = self.shared.session.lock();
        let generation = session.supersede();
        debug!(generation, "Search session reset");
        self.shared.view.send_replace(SearchView {
            query: query.to_string(),
            ..SearchView::default()
        });
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shared.session.lock().supersede();
    }
}

impl Shared {
    fn limits(&self) -> Limits {
        Limits {
            keywords: self.settings.max_keywords,
            media: self.settings.max_media,
        }
    }

    async fn run_cycle(&self, generation: u64, query: String) {
        tokio::time::sleep(self.settings.debounce()).await;

        {
            let session = self.session.lock();
            if session.generation != generation {
                return;
            }
            self.view.send_modify(|view| view.phase = Phase::Fetching);
        }

        debug!(generation, query = %query, "Fetching suggestions");
        let (media, keywords) = tokio::join!(
            self.provider.search_multi(&query),
            self.provider.search_keywords(&query)
        );

        let session = self.session.lock();
        if session.generation != generation {
            debug!(generation, current = session.generation, "Discarding superseded results");
            return;
        }

        match (media, keywords) {
            (Err(media_err), Err(keyword_err)) => {
                warn!(
                    query = %query,
                    media_error = %media_err,
                    keyword_error = %keyword_err,
                    "Both searches failed; keeping previous dropdown"
                );
                self.view.send_modify(|view| {
                    view.phase = if view.is_visible() {
                        Phase::Displaying
                    } else {
                        Phase::Idle
                    };
                });
            }
            (media, keywords) => {
                if let Err(e) = &media {
                    warn!(query = %query, error = %e, "Media search failed; showing keywords only");
                }
                if let Err(e) = &keywords {
                    warn!(query = %query, error = %e, "Keyword search failed; showing media only");
                }

                let dropdown = Dropdown::compose(
                    &query,
                    keywords.ok().map(|page| page.results),
                    media.ok().map(|page| page.results),
                    self.limits(),
                );
                self.view.send_replace(SearchView {
                    phase: Phase::Displaying,
                    query,
                    dropdown: Some(dropdown),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        Genre, Keyword, Listing, MultiResult, Page, TitleDetails, TitleSummary,
    };
    use async_trait::async_trait;
    use cinetech_common::{Error, Result};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted search backend: per-query delay and failure switches.
    #[derive(Default)]
    struct StubProvider {
        delays: HashMap<String, u64>,
        fail_media: AtomicBool,
        fail_keywords: AtomicBool,
        media_calls: Mutex<Vec<String>>,
        keyword_calls: AtomicUsize,
    }

    impl StubProvider {
        fn with_delay(mut self, query: &str, ms: u64) -> Self {
            self.delays.insert(query.to_string(), ms);
            self
        }

        fn failing(media: bool, keywords: bool) -> Self {
            let stub = Self::default();
            stub.set_failures(media, keywords);
            stub
        }

        fn set_failures(&self, media: bool, keywords: bool) {
            self.fail_media.store(media, Ordering::SeqCst);
            self.fail_keywords.store(keywords, Ordering::SeqCst);
        }

        async fn wait(&self, query: &str) {
            if let Some(ms) = self.delays.get(query) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
        }

        fn media_calls(&self) -> Vec<String> {
            self.media_calls.lock().clone()
        }
    }

    fn title(query: &str) -> TitleSummary {
        TitleSummary {
            id: MediaId::new(query.len() as u64),
            kind: MediaKind::Movie,
            title: format!("{query} movie"),
            original_title: None,
            overview: None,
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: None,
            popularity: None,
            genre_ids: vec![],
        }
    }

    #[async_trait]
    impl CatalogProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn list(&self, _listing: Listing, _page: u32) -> Result<Page<TitleSummary>> {
            Ok(Page::of(vec![]))
        }

        async fn search_multi(&self, query: &str) -> Result<Page<MultiResult>> {
            self.media_calls.lock().push(query.to_string());
            self.wait(query).await;
            if self.fail_media.load(Ordering::SeqCst) {
                return Err(Error::remote(500));
            }
            Ok(Page::of(vec![MultiResult::Movie(title(query))]))
        }

        async fn search_titles(&self, _kind: MediaKind, _query: &str) -> Result<Page<TitleSummary>> {
            Ok(Page::of(vec![]))
        }

        async fn search_keywords(&self, query: &str) -> Result<Page<Keyword>> {
            self.keyword_calls.fetch_add(1, Ordering::SeqCst);
            self.wait(query).await;
            if self.fail_keywords.load(Ordering::SeqCst) {
                return Err(Error::transport("connection refused"));
            }
            Ok(Page::of(vec![Keyword {
                id: 1,
                name: format!("{query} keyword"),
            }]))
        }

        async fn details(&self, _kind: MediaKind, id: MediaId) -> Result<TitleDetails> {
            Err(Error::not_found(format!("title {id}")))
        }

        async fn similar(&self, _kind: MediaKind, _id: MediaId) -> Result<Page<TitleSummary>> {
            Ok(Page::of(vec![]))
        }

        async fn genres(&self, _kind: MediaKind) -> Result<Vec<Genre>> {
            Ok(vec![])
        }
    }

    fn controller(stub: StubProvider) -> (SearchController, Arc<StubProvider>) {
        let stub = Arc::new(stub);
        let provider: Arc<dyn CatalogProvider> = stub.clone();
        (SearchController::new(provider, SearchConfig::default()), stub)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystrokes_within_interval_issue_one_fetch() {
        let (search, stub) = controller(StubProvider::default());

        for text in ["al", "ali", "alie", "alien"] {
            search.on_input(text);
            advance(100).await;
            assert_eq!(search.view().phase, Phase::Pending);
        }
        advance(300).await;

        assert_eq!(stub.media_calls(), vec!["alien".to_string()]);
        assert_eq!(stub.keyword_calls.load(Ordering::SeqCst), 1);

        let view = search.view();
        assert_eq!(view.phase, Phase::Displaying);
        let dropdown = view.dropdown.unwrap();
        assert_eq!(dropdown.query, "alien");
        assert_eq!(dropdown.keywords[0].name, "alien keyword");
        assert_eq!(dropdown.media[0].title, "alien movie");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_fetch_never_overwrites_newer_results() {
        let stub = StubProvider::default()
            .with_delay("xx", 500)
            .with_delay("yy", 50);
        let (search, stub) = controller(stub);

        search.on_input("xx");
        advance(310).await;
        assert_eq!(search.view().phase, Phase::Fetching);

        search.on_input("yy");
        advance(1_000).await;

        assert_eq!(stub.media_calls(), vec!["xx".to_string(), "yy".to_string()]);
        let view = search.view();
        assert_eq!(view.phase, Phase::Displaying);
        assert_eq!(view.dropdown.unwrap().query, "yy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_query_is_ever_published() {
        let stub = StubProvider::default().with_delay("xx", 500);
        let (search, _stub) = controller(stub);
        let mut rx = search.subscribe();

        search.on_input("xx");
        advance(310).await;

        // A newer cycle that completes before the first one resolves.
        search.on_input("yy");
        let mut queries = Vec::new();
        let deadline = tokio::time::Instant::now() + Duration::from_millis(1_000);
        while let Ok(Ok(())) = tokio::time::timeout_at(deadline, rx.changed()).await {
            if let Some(dropdown) = &rx.borrow_and_update().dropdown {
                queries.push(dropdown.query.clone());
            }
        }

        assert!(!queries.is_empty());
        assert!(queries.iter().all(|q| q == "yy"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_hides_dropdown_without_fetch() {
        let (search, stub) = controller(StubProvider::default());

        search.on_input("star");
        advance(400).await;
        assert!(search.view().is_visible());

        search.on_input(" s ");
        let view = search.view();
        assert_eq!(view.phase, Phase::Idle);
        assert!(!view.is_visible());

        search.on_input("");
        advance(400).await;
        assert_eq!(stub.media_calls(), vec!["star".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_cancels_pending_timer() {
        let (search, stub) = controller(StubProvider::default());

        search.on_input("star");
        advance(200).await;
        search.on_input("s");
        advance(400).await;

        assert!(stub.media_calls().is_empty());
        assert_eq!(search.view().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyword_failure_still_shows_media() {
        let (search, _stub) = controller(StubProvider::failing(false, true));

        search.on_input("heat");
        advance(400).await;

        let view = search.view();
        assert_eq!(view.phase, Phase::Displaying);
        let dropdown = view.dropdown.unwrap();
        assert!(dropdown.keywords.is_empty());
        assert_eq!(dropdown.media.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_failures_keep_previous_dropdown() {
        let (search, stub) = controller(StubProvider::default());
        search.on_input("heat");
        advance(400).await;
        let before = search.view().dropdown;
        assert!(before.is_some());

        stub.set_failures(true, true);
        search.on_input("heist");
        advance(400).await;

        let view = search.view();
        assert_eq!(view.phase, Phase::Displaying);
        assert_eq!(view.dropdown, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_failures_without_dropdown_return_to_idle() {
        let (search, _stub) = controller(StubProvider::failing(true, true));

        search.on_input("heat");
        advance(400).await;

        let view = search.view();
        assert_eq!(view.phase, Phase::Idle);
        assert!(!view.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_bypasses_dropdown() {
        let (search, stub) = controller(StubProvider::default());

        search.on_input("dune");
        advance(100).await;
        let nav = search.on_submit("dune ");
        advance(400).await;

        assert_eq!(
            nav,
            Some(Navigation::SearchResults {
                query: "dune".into()
            })
        );
        assert!(stub.media_calls().is_empty());
        assert!(!search.view().is_visible());
        assert_eq!(search.on_submit("d"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_hides_and_cancels() {
        let (search, stub) = controller(StubProvider::default());

        search.on_input("dune");
        advance(400).await;
        assert!(search.view().is_visible());

        search.on_input("dune 2");
        advance(100).await;
        search.dismiss();
        advance(400).await;

        assert_eq!(stub.media_calls(), vec!["dune".to_string()]);
        let view = search.view();
        assert_eq!(view.phase, Phase::Idle);
        assert!(!view.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_media_navigates_to_title() {
        let (search, _stub) = controller(StubProvider::default());
        search.on_input("up");
        advance(400).await;

        let suggestion = search.view().dropdown.unwrap().media[0].clone();
        let nav = search.select_media(&suggestion);

        assert_eq!(
            nav,
            Navigation::Title {
                id: suggestion.id,
                kind: MediaKind::Movie
            }
        );
        assert!(!search.view().is_visible());
    }
}
