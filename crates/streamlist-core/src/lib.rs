pub mod cache;
pub mod error;
pub mod notification;
pub mod persist;
pub mod search;
pub mod storage;
pub mod store;

pub use cache::{NetworkFirstCatalog, SearchCache};
pub use error::{StorageError, StoreError};
pub use notification::{NotificationController, NotificationState};
pub use persist::PersistentStore;
pub use search::{SearchOutcome, SearchSession};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use store::WatchlistStore;
