use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no TMDB API key configured (set TMDB_API_KEY or run `streamlist config api-key`)")]
    MissingApiKey,

    #[error("request to catalog failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Other(String),
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
