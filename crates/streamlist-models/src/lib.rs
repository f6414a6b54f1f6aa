pub mod movie;
pub mod notification;
pub mod outcome;
pub mod watched;

pub use movie::{Movie, MovieId};
pub use notification::{Notification, Severity};
pub use outcome::MutationOutcome;
pub use watched::WatchedMovies;
