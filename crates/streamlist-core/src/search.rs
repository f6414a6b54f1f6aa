use streamlist_models::{Movie, MovieId};
use streamlist_sources::MovieCatalog;
use tracing::{debug, info, warn};

use crate::persist::{PersistentStore, SEARCH_QUERY_KEY};

pub const SEARCH_ERROR: &str = "Failed to fetch movies. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query, nothing was sent
    Skipped,
    Completed { count: usize },
    Failed { message: String },
}

/// Search state for one view: the query, the last results and an inline error.
///
/// A failed search keeps the previous results on display. Each completed
/// search simply replaces the results; there is no ordering guard between
/// searches.
pub struct SearchSession<C> {
    catalog: C,
    storage: PersistentStore,
    query: String,
    results: Vec<Movie>,
    loading: bool,
    error: Option<String>,
}

impl<C: MovieCatalog> SearchSession<C> {
    /// Start a session, picking up the last persisted query
    pub fn new(catalog: C, storage: PersistentStore) -> Self {
        let query = storage.read_raw(SEARCH_QUERY_KEY).unwrap_or_default();
        Self {
            catalog,
            storage,
            query,
            results: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Movie] {
        &self.results
    }

    pub fn find_result(&self, id: MovieId) -> Option<&Movie> {
        self.results.iter().find(|m| m.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Update the query text; non-blank text is remembered for the next session
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        if !query.trim().is_empty() {
            self.storage.write_raw(SEARCH_QUERY_KEY, query);
        }
    }

    /// Re-run the persisted query, if there is one
    pub async fn restore(&mut self) -> SearchOutcome {
        if self.query.trim().is_empty() {
            return SearchOutcome::Skipped;
        }
        info!(query = %self.query, "Restoring last search");
        self.search_current().await
    }

    pub async fn search(&mut self, query: &str) -> SearchOutcome {
        self.set_query(query);
        self.search_current().await
    }

    /// Search for the current query text
    pub async fn search_current(&mut self) -> SearchOutcome {
        let query = self.query.clone();
        if query.trim().is_empty() {
            debug!("Skipping blank search");
            return SearchOutcome::Skipped;
        }

        self.loading = true;
        self.error = None;

        let outcome = match self.catalog.search_movies(&query).await {
            Ok(movies) => {
                info!(query = %query, results = movies.len(), catalog = self.catalog.catalog_name(), "Search completed");
                let count = movies.len();
                self.results = movies;
                SearchOutcome::Completed { count }
            }
            Err(e) => {
                warn!(query = %query, "Error fetching movies: {}", e);
                self.error = Some(SEARCH_ERROR.to_string());
                SearchOutcome::Failed {
                    message: SEARCH_ERROR.to_string(),
                }
            }
        };

        self.loading = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use streamlist_models::MovieId;
    use streamlist_sources::SourceError;

    /// Catalog that replays scripted responses and records the queries it saw
    #[derive(Default)]
    struct ScriptedCatalog {
        responses: Mutex<VecDeque<Result<Vec<Movie>, SourceError>>>,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedCatalog {
        fn with(responses: Vec<Result<Vec<Movie>, SourceError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MovieCatalog for ScriptedCatalog {
        fn catalog_name(&self) -> &str {
            "scripted"
        }

        async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, SourceError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SourceError::new("no scripted response")))
        }

        async fn movie_details(&self, id: MovieId) -> Result<Movie, SourceError> {
            Err(SourceError::new(format!("no details for {}", id)))
        }
    }

    #[tokio::test]
    async fn test_blank_query_is_a_no_op() {
        let storage = PersistentStore::in_memory();
        let mut session = SearchSession::new(ScriptedCatalog::default(), storage.clone());

        assert_eq!(session.search("   ").await, SearchOutcome::Skipped);
        assert!(session.catalog().queries().is_empty());
        assert!(!session.is_loading());
        assert_eq!(storage.read_raw(SEARCH_QUERY_KEY), None);
    }

    #[tokio::test]
    async fn test_success_replaces_results_and_persists_query() {
        let storage = PersistentStore::in_memory();
        let catalog = ScriptedCatalog::with(vec![Ok(vec![Movie::new(1, "Alien"), Movie::new(2, "Aliens")])]);
        let mut session = SearchSession::new(catalog, storage.clone());

        let outcome = session.search("alien").await;

        assert_eq!(outcome, SearchOutcome::Completed { count: 2 });
        assert_eq!(session.results().len(), 2);
        assert_eq!(session.find_result(2).map(|m| m.title.as_str()), Some("Aliens"));
        assert_eq!(session.find_result(99), None);
        assert_eq!(session.error(), None);
        assert!(!session.is_loading());
        assert_eq!(storage.read_raw(SEARCH_QUERY_KEY).as_deref(), Some("alien"));
    }

    #[tokio::test]
    async fn test_failure_keeps_results_then_success_clears_error() {
        let catalog = ScriptedCatalog::with(vec![
            Ok(vec![Movie::new(1, "Heat")]),
            Err(SourceError::Status { status: 500, body: "down".to_string() }),
            Ok(vec![Movie::new(7, "Ronin")]),
        ]);
        let mut session = SearchSession::new(catalog, PersistentStore::in_memory());

        session.search("heat").await;
        let failed = session.search("ronin").await;

        assert_eq!(failed, SearchOutcome::Failed { message: SEARCH_ERROR.to_string() });
        assert_eq!(session.error(), Some(SEARCH_ERROR));
        assert_eq!(session.results(), &[Movie::new(1, "Heat")]);
        assert!(!session.is_loading());

        let retried = session.search_current().await;

        assert_eq!(retried, SearchOutcome::Completed { count: 1 });
        assert_eq!(session.error(), None);
        assert_eq!(session.results(), &[Movie::new(7, "Ronin")]);
        assert_eq!(session.catalog().queries(), vec!["heat", "ronin", "ronin"]);
    }

    #[tokio::test]
    async fn test_restore_reissues_persisted_query() {
        let storage = PersistentStore::in_memory();
        storage.write_raw(SEARCH_QUERY_KEY, "blade runner");
        let catalog = ScriptedCatalog::with(vec![Ok(vec![Movie::new(78, "Blade Runner")])]);
        let mut session = SearchSession::new(catalog, storage);

        assert_eq!(session.query(), "blade runner");
        assert_eq!(session.restore().await, SearchOutcome::Completed { count: 1 });
        assert_eq!(session.catalog().queries(), vec!["blade runner"]);
    }

    #[tokio::test]
    async fn test_restore_without_saved_query_does_nothing() {
        let mut session = SearchSession::new(ScriptedCatalog::default(), PersistentStore::in_memory());
        assert_eq!(session.restore().await, SearchOutcome::Skipped);
        assert!(session.catalog().queries().is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_does_not_overwrite_saved_query() {
        let storage = PersistentStore::in_memory();
        let mut session = SearchSession::new(ScriptedCatalog::default(), storage.clone());
        session.set_query("dune");
        session.set_query("");
        assert_eq!(storage.read_raw(SEARCH_QUERY_KEY).as_deref(), Some("dune"));
    }
}
