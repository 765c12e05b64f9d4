//! In-process session store

use super::{SessionStore, StoreError};
use crate::game::{GameSession, SessionUpdate};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Sessions kept in a map for the life of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, GameSession>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a session wholesale, bypassing the update rules
    pub async fn put(&self, session: GameSession) {
        self.sessions
            .write()
            .await
            .insert(session.game_id.clone(), session);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, game_id: &str) -> Result<Option<GameSession>, StoreError> {
        Ok(self.sessions.read().await.get(game_id).cloned())
    }

    async fn create(&self, session: &GameSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.game_id) {
            return Err(StoreError::Conflict(session.game_id.clone()));
        }
        sessions.insert(session.game_id.clone(), session.clone());
        Ok(())
    }

    async fn update(&self, game_id: &str, update: &SessionUpdate) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(game_id)
            .ok_or_else(|| StoreError::Missing(game_id.to_string()))?;
        session.apply_update(update);
        Ok(())
    }
}
