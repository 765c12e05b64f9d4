//! Session persistence
//!
//! Game state lives in a document store keyed by game id. Each request does a
//! plain read followed by a write; the store offers no transaction around the
//! pair, so callers that need one serialize per game id themselves.

mod error;
mod firestore;
mod memory;

pub use error::StoreError;
pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::MemoryStore;

use crate::game::{GameSession, SessionUpdate};
use async_trait::async_trait;

/// Document store holding one record per game
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a session, or `None` if the id is unknown
    async fn get(&self, game_id: &str) -> Result<Option<GameSession>, StoreError>;

    /// Store a newly created session
    async fn create(&self, session: &GameSession) -> Result<(), StoreError>;

    /// Write the fields named by `update` on an existing session
    ///
    /// Fails with [`StoreError::Missing`] if the session does not exist.
    async fn update(&self, game_id: &str, update: &SessionUpdate) -> Result<(), StoreError>;
}
