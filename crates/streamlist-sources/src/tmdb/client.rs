use crate::error::SourceError;
use crate::tmdb::api;
use crate::traits::MovieCatalog;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use streamlist_models::{Movie, MovieId};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Result<Self, SourceError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), Duration::from_secs(10))
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("streamlist/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn catalog_name(&self) -> &str {
        "tmdb"
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, SourceError> {
        api::search_movies(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn movie_details(&self, id: MovieId) -> Result<Movie, SourceError> {
        api::get_movie(&self.client, &self.base_url, &self.api_key, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TmdbClient {
        TmdbClient::with_base_url("test-key".to_string(), server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        assert!(matches!(
            TmdbClient::new("  ".to_string()),
            Err(SourceError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_search_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("query", "the matrix"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [
                    {"id": 603, "title": "The Matrix", "poster_path": "/m.jpg", "release_date": "1999-03-30", "overview": "Neo", "popularity": 80.1},
                    {"id": 604, "title": "The Matrix Reloaded", "poster_path": null, "release_date": "2003-05-15", "overview": ""}
                ],
                "total_results": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let movies = client_for(&server).search_movies("the matrix").await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, 603);
        assert_eq!(movies[0].poster_path.as_deref(), Some("/m.jpg"));
        assert_eq!(movies[1].title, "The Matrix Reloaded");
        assert_eq!(movies[1].poster_path, None);
    }

    #[tokio::test]
    async fn test_search_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let err = client_for(&server).search_movies("x").await.unwrap_err();
        match err {
            SourceError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid API key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_movie_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .and(query_param("api_key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 550,
                "title": "Fight Club",
                "poster_path": "/fc.jpg",
                "release_date": "1999-10-15",
                "overview": "A ticking-time-bomb insomniac...",
                "runtime": 139
            })))
            .mount(&server)
            .await;

        let movie = client_for(&server).movie_details(550).await.unwrap();
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.release_date, "1999-10-15");
    }
}
