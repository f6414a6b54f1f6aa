use serde::{Deserialize, Serialize};

pub type MovieId = u64;

/// A catalog entry as it is kept in the stream list.
///
/// Catalog payloads carry many more fields; only these are retained. Missing
/// `release_date` or `overview` deserialize as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            release_date: String::new(),
            overview: String::new(),
        }
    }

    /// Full poster URL, if the movie has a poster
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path))
    }

    /// Release date for display, `N/A` when the catalog has none
    pub fn display_release_date(&self) -> &str {
        if self.release_date.is_empty() {
            "N/A"
        } else {
            &self.release_date
        }
    }

    pub fn display_overview(&self) -> &str {
        if self.overview.is_empty() {
            "No description available."
        } else {
            &self.overview
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_payload_ignores_extra_fields() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "release_date": "1999-03-30",
            "overview": "Set in the 22nd century...",
            "vote_average": 8.2,
            "adult": false
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.release_date, "1999-03-30");
    }

    #[test]
    fn test_missing_and_null_fields_become_empty() {
        let json = r#"{"id": 1, "title": "X", "poster_path": null, "release_date": null}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.overview, "");
        assert_eq!(movie.display_release_date(), "N/A");
        assert_eq!(movie.display_overview(), "No description available.");
    }

    #[test]
    fn test_poster_url() {
        let mut movie = Movie::new(1, "X");
        assert_eq!(movie.poster_url("https://image.tmdb.org/t/p/w200"), None);

        movie.poster_path = Some("/abc.jpg".to_string());
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w200/"),
            Some("https://image.tmdb.org/t/p/w200/abc.jpg".to_string())
        );
    }
}
