use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::time::Duration;
use streamlist_config::{Config, CredentialStore, PathManager};
use streamlist_core::{NetworkFirstCatalog, NotificationController, PersistentStore, SearchCache, SearchSession, WatchlistStore};
use streamlist_sources::{MovieCatalog, TmdbClient};
use tracing::{debug, info};

/// Everything a command needs: paths, settings and the hydrated watchlist
pub struct App {
    pub paths: PathManager,
    pub config: Config,
    pub storage: PersistentStore,
    pub store: WatchlistStore,
}

impl App {
    pub fn load(paths: PathManager, config: Config) -> Result<Self> {
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create data directories: {}", e))?;

        let storage = PersistentStore::open(&paths)
            .wrap_err_with(|| format!("Failed to open {}", paths.local_storage_file().display()))?;
        let store = WatchlistStore::hydrate(storage.clone(), NotificationController::from_config(&config.notifications));

        Ok(Self {
            paths,
            config,
            storage,
            store,
        })
    }

    /// Show the load-error banner once; later commands start clean
    pub fn report_load_error(&mut self, output: &Output) {
        if let Some(error) = self.store.error() {
            output.error(error);
            self.store.clear_error();
        }
    }

    pub fn catalog(&self) -> Result<Box<dyn MovieCatalog>> {
        let credentials_file = self.paths.credentials_file();
        let mut cred_store = CredentialStore::new(credentials_file.clone());
        cred_store
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        let api_key = cred_store.resolve_tmdb_api_key().ok_or_else(|| {
            eyre!("No TMDB API key configured. Run 'streamlist config api-key' or set TMDB_API_KEY.")
        })?;

        let client = TmdbClient::with_base_url(
            api_key,
            self.config.tmdb.base_url.clone(),
            Duration::from_secs(self.config.tmdb.timeout_seconds),
        )?;
        debug!(base_url = client.base_url(), "TMDB client ready");

        if self.config.cache.offline_search {
            let cache = SearchCache::new(&self.paths)
                .map_err(|e| eyre!("Failed to open search cache: {}", e))?;
            info!(dir = %cache.dir().display(), "Offline search fallback enabled");
            Ok(Box::new(NetworkFirstCatalog::new(client, cache)))
        } else {
            Ok(Box::new(client))
        }
    }

    pub fn search_session(&self) -> Result<SearchSession<Box<dyn MovieCatalog>>> {
        Ok(SearchSession::new(self.catalog()?, self.storage.clone()))
    }
}
