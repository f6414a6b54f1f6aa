use reqwest::Client;
use serde::Deserialize;
use streamlist_models::{Movie, MovieId};
use tracing::{debug, warn};

use crate::error::SourceError;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Movie>,
    #[serde(default)]
    total_results: Option<u64>,
}

/// Search movies by title
///
/// Results are taken as-is from the `results` array; no filtering or
/// re-ordering is applied.
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<Movie>, SourceError> {
    let url = format!("{}/search/movie", base_url.trim_end_matches('/'));
    debug!(query = %query, "Searching TMDB");

    let response = client
        .get(&url)
        .query(&[("api_key", api_key), ("query", query)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "TMDB search failed");
        return Err(SourceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: SearchResponse = response.json().await?;
    debug!(
        query = %query,
        returned = parsed.results.len(),
        total = parsed.total_results.unwrap_or_default(),
        "TMDB search completed"
    );
    Ok(parsed.results)
}

/// Fetch one movie by id
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    api_key: &str,
    id: MovieId,
) -> Result<Movie, SourceError> {
    let url = format!("{}/movie/{}", base_url.trim_end_matches('/'), id);

    let response = client
        .get(&url)
        .query(&[("api_key", api_key)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}
