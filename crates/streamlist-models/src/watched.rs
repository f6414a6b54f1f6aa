use std::collections::BTreeMap;

use crate::movie::MovieId;

/// Watched flags keyed by movie id.
///
/// Serializes as a JSON object with stringified ids. Entries are kept after
/// the movie leaves the stream list.
pub type WatchedMovies = BTreeMap<MovieId, bool>;
