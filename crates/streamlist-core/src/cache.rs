use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use streamlist_config::PathManager;
use streamlist_models::{Movie, MovieId};
use streamlist_sources::{MovieCatalog, SourceError};
use tracing::{debug, info, warn};

/// On-disk copy of the last successful response for each search query
#[derive(Clone)]
pub struct SearchCache {
    dir: PathBuf,
}

impl SearchCache {
    pub fn new(path_manager: &PathManager) -> Result<Self> {
        Self::in_dir(path_manager.search_cache_dir())
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn cache_path(&self, query: &str) -> PathBuf {
        let normalized = query.trim().to_lowercase();

        let readable: String = normalized
            .chars()
            .take(40)
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();

        let mut hasher = DefaultHasher::new();
        normalized.hash(&mut hasher);

        self.dir.join(format!("{}-{:016x}.json", readable, hasher.finish()))
    }

    pub fn load(&self, query: &str) -> Option<Vec<Movie>> {
        let cache_path = self.cache_path(query);

        if !cache_path.exists() {
            debug!("Search cache miss: {:?} (file does not exist)", query);
            return None;
        }

        match std::fs::read_to_string(&cache_path) {
            Ok(content) => match serde_json::from_str::<Vec<Movie>>(&content) {
                Ok(movies) => {
                    debug!("Search cache hit: {:?} ({} movies)", query, movies.len());
                    Some(movies)
                }
                Err(e) => {
                    warn!(
                        "Search cache corruption detected for {:?}: {}. Deleting corrupted file.",
                        query, e
                    );
                    if let Err(rm_err) = std::fs::remove_file(&cache_path) {
                        warn!("Failed to delete corrupted cache file: {}", rm_err);
                    }
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read search cache for {:?}: {}", query, e);
                None
            }
        }
    }

    pub fn save(&self, query: &str, movies: &[Movie]) -> Result<()> {
        let cache_path = self.cache_path(query);
        let json = serde_json::to_string_pretty(movies)
            .map_err(|e| anyhow!("Failed to serialize search cache: {}", e))?;

        std::fs::write(&cache_path, json).map_err(|e| anyhow!("Failed to write search cache: {}", e))?;
        debug!("Search cache saved: {:?} ({} movies)", query, movies.len());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            std::fs::remove_dir_all(&self.dir)?;
            std::fs::create_dir_all(&self.dir)?;
            info!("Cleared search cache directory: {:?}", self.dir);
        }
        Ok(())
    }
}

/// Catalog wrapper that prefers the network and falls back to the last
/// cached response for the same query when the request fails.
pub struct NetworkFirstCatalog<C> {
    inner: C,
    cache: SearchCache,
}

impl<C: MovieCatalog> NetworkFirstCatalog<C> {
    pub fn new(inner: C, cache: SearchCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<C: MovieCatalog> MovieCatalog for NetworkFirstCatalog<C> {
    fn catalog_name(&self) -> &str {
        self.inner.catalog_name()
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, SourceError> {
        match self.inner.search_movies(query).await {
            Ok(movies) => {
                if let Err(e) = self.cache.save(query, &movies) {
                    warn!("{}", e);
                }
                Ok(movies)
            }
            Err(e) => match self.cache.load(query) {
                Some(movies) => {
                    warn!("Catalog unavailable ({}), serving {} cached results for {:?}", e, movies.len(), query);
                    Ok(movies)
                }
                None => Err(e),
            },
        }
    }

    async fn movie_details(&self, id: MovieId) -> Result<Movie, SourceError> {
        self.inner.movie_details(id).await
    }
}
