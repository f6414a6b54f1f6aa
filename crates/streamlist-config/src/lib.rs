pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CacheConfig, Config, LoggingConfig, NotificationConfig, TmdbConfig};
pub use credentials::CredentialStore;
pub use paths::{PathManager, base_path_override};
