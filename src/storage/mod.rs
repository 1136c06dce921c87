pub mod engine;
pub mod memory;
pub mod persistence;

pub use engine::{KeyValueStore, KeyValueStoreExt};
pub use memory::MemoryStore;
pub use persistence::FileStore;

/// Key holding the adopted-repository records.
pub const ADOPTED_REPOSITORIES_KEY: &str = "adopted-repositories";
/// Key holding the signed-in user.
pub const AUTH_USER_KEY: &str = "auth-user";
