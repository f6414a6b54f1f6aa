use std::collections::HashSet;
use streamlist_models::{Movie, MovieId, MutationOutcome, Notification, WatchedMovies};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::notification::NotificationController;
use crate::persist::{PersistentStore, DARK_MODE_KEY, STREAM_LIST_KEY, WATCHED_MOVIES_KEY};

pub const LOAD_ERROR: &str = "Failed to load your saved data. Please refresh the page.";
pub const ADD_ERROR: &str = "Failed to add movie to stream list.";
pub const REMOVE_ERROR: &str = "Failed to remove movie from stream list.";
pub const TOGGLE_ERROR: &str = "Failed to update watched status.";
pub const RETRY_MESSAGE: &str = "An error occurred. Please try again.";

/// Owns the stream list, watched flags and dark-mode preference.
///
/// State is hydrated once from the persistent store and written back after
/// every mutation. Mutations never return an error: internal failures become
/// a failure outcome, a store-level error string and an error notification.
pub struct WatchlistStore {
    storage: PersistentStore,
    stream_list: Vec<Movie>,
    watched_movies: WatchedMovies,
    dark_mode: bool,
    loading: bool,
    error: Option<String>,
    notifications: NotificationController,
}

impl WatchlistStore {
    /// Load saved state, falling back to empty defaults per key
    pub fn hydrate(storage: PersistentStore, notifications: NotificationController) -> Self {
        let mut load_failed = false;

        if let Some(e) = storage.load_error() {
            warn!("Local storage could not be opened cleanly: {}", e);
            load_failed = true;
        }

        let stream_list: Vec<Movie> = storage.read(STREAM_LIST_KEY, Vec::new()).unwrap_or_else(|e| {
            warn!("Error loading stream list: {}", e);
            load_failed = true;
            Vec::new()
        });

        let watched_movies = storage
            .read(WATCHED_MOVIES_KEY, WatchedMovies::new())
            .unwrap_or_else(|e| {
                warn!("Error loading watched movies: {}", e);
                load_failed = true;
                WatchedMovies::new()
            });

        let dark_mode = storage.read_raw(DARK_MODE_KEY).as_deref() == Some("true");

        info!(
            movies = stream_list.len(),
            watched_flags = watched_movies.len(),
            dark_mode,
            "Watchlist state loaded"
        );

        Self {
            storage,
            stream_list,
            watched_movies,
            dark_mode,
            loading: false,
            error: load_failed.then(|| LOAD_ERROR.to_string()),
            notifications,
        }
    }

    pub fn stream_list(&self) -> &[Movie] {
        &self.stream_list
    }

    pub fn watched_movies(&self) -> &WatchedMovies {
        &self.watched_movies
    }

    pub fn is_watched(&self, id: MovieId) -> bool {
        self.watched_movies.get(&id).copied().unwrap_or(false)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.stream_list.iter().any(|m| m.id == id)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationController {
        &mut self.notifications
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
    }

    /// Append `movie` unless an entry with the same id is already listed
    pub fn add_to_stream_list(&mut self, movie: Movie) -> MutationOutcome {
        self.run_mutation(ADD_ERROR, Some(RETRY_MESSAGE), move |store| {
            store.check_integrity()?;
            if store.contains(movie.id) {
                debug!(id = movie.id, "Movie already in stream list");
                return Ok(MutationOutcome::failed(Some(format!(
                    "{} is already in your Stream List.",
                    movie.title
                ))));
            }

            let message = format!("{} added to your Stream List!", movie.title);
            info!(id = movie.id, title = %movie.title, "Added to stream list");
            store.stream_list.push(movie);
            Ok(MutationOutcome::succeeded(Some(message)))
        })
    }

    /// Remove every entry for `id`. Removing an absent id succeeds silently.
    /// The watched flag for `id` is left in place.
    pub fn remove_from_stream_list(&mut self, id: MovieId) -> MutationOutcome {
        self.run_mutation(REMOVE_ERROR, None, move |store| {
            let Some(title) = store.stream_list.iter().find(|m| m.id == id).map(|m| m.title.clone()) else {
                debug!(id, "Remove requested for movie not in stream list");
                return Ok(MutationOutcome::succeeded(None));
            };

            let before = store.stream_list.len();
            store.stream_list.retain(|m| m.id != id);
            info!(id, title = %title, removed = before - store.stream_list.len(), "Removed from stream list");
            Ok(MutationOutcome::succeeded(Some(format!(
                "{} removed from your Stream List.",
                title
            ))))
        })
    }

    /// Flip the watched flag for `id`, treating a missing flag as unwatched
    pub fn toggle_watched(&mut self, id: MovieId) -> MutationOutcome {
        self.run_mutation(TOGGLE_ERROR, None, move |store| {
            let watched = !store.is_watched(id);
            store.watched_movies.insert(id, watched);
            info!(id, watched, "Watched flag updated");

            let message = store.stream_list.iter().find(|m| m.id == id).map(|movie| {
                if watched {
                    format!("{} marked as watched.", movie.title)
                } else {
                    format!("{} marked as unwatched.", movie.title)
                }
            });
            Ok(MutationOutcome::succeeded(message))
        })
    }

    /// Flip the dark-mode preference and return the new value
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.persist();
        self.dark_mode
    }

    fn run_mutation<F>(&mut self, error: &str, failure_message: Option<&str>, op: F) -> MutationOutcome
    where
        F: FnOnce(&mut Self) -> Result<MutationOutcome, StoreError>,
    {
        self.loading = true;

        let outcome = match op(self) {
            Ok(outcome) => {
                self.persist();
                if let Some(notification) = outcome.to_notification() {
                    self.notifications.notify(notification);
                }
                outcome
            }
            Err(e) => {
                warn!("{}: {}", error, e);
                self.error = Some(error.to_string());
                self.notifications.notify(Notification::error(error));
                MutationOutcome::failed(failure_message.map(str::to_string))
            }
        };

        self.loading = false;
        outcome
    }

    /// A list holding the same id twice cannot take new entries; removing
    /// that id repairs it
    fn check_integrity(&self) -> Result<(), StoreError> {
        let mut seen = HashSet::with_capacity(self.stream_list.len());
        for movie in &self.stream_list {
            if !seen.insert(movie.id) {
                return Err(StoreError::DuplicateEntry {
                    id: movie.id,
                    title: movie.title.clone(),
                });
            }
        }
        Ok(())
    }

    fn persist(&self) {
        self.storage.write(STREAM_LIST_KEY, &self.stream_list);
        self.storage.write(WATCHED_MOVIES_KEY, &self.watched_movies);
        self.storage.write_raw(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" });
    }
}
