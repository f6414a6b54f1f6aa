use async_trait::async_trait;
use streamlist_models::{Movie, MovieId};

use crate::error::SourceError;

/// A remote movie catalog that can be searched by title
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    /// Run a title search and return the matching movies in catalog order
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, SourceError>;

    /// Fetch a single movie by its catalog id
    async fn movie_details(&self, id: MovieId) -> Result<Movie, SourceError>;
}

#[async_trait]
impl<C: MovieCatalog + ?Sized> MovieCatalog for Box<C> {
    fn catalog_name(&self) -> &str {
        (**self).catalog_name()
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, SourceError> {
        (**self).search_movies(query).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<Movie, SourceError> {
        (**self).movie_details(id).await
    }
}
