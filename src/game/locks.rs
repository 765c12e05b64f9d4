//! Per-session serialization of read-modify-write updates

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Mutex for one game id and the number of requests holding or waiting on it
#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    users: usize,
}

type LockMap = FxHashMap<String, Slot>;

/// One async mutex per game id, created on demand and dropped when idle
#[derive(Debug, Default)]
pub struct SessionLocks {
    inner: Mutex<LockMap>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other request holds `game_id`, then hold it
    ///
    /// Dropping the returned future while it waits releases its claim on the
    /// entry, same as dropping the guard.
    pub async fn acquire(&self, game_id: &str) -> SessionGuard<'_> {
        let mutex = {
            let mut map = self.map();
            let slot = map.entry(game_id.to_string()).or_default();
            slot.users += 1;
            Arc::clone(&slot.mutex)
        };

        let mut guard = SessionGuard {
            locks: self,
            game_id: game_id.to_string(),
            held: None,
        };
        guard.held = Some(mutex.lock_owned().await);
        guard
    }

    /// Number of game ids currently locked or waited on
    #[must_use]
    pub fn active(&self) -> usize {
        self.map().len()
    }

    fn map(&self) -> std::sync::MutexGuard<'_, LockMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, game_id: &str) {
        let mut map = self.map();
        if let Some(slot) = map.get_mut(game_id) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                map.remove(game_id);
            }
        }
    }
}

/// Claim on one game id; holds the lock once `acquire` completes
#[derive(Debug)]
pub struct SessionGuard<'a> {
    locks: &'a SessionLocks,
    game_id: String,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        drop(self.held.take());
        self.locks.release(&self.game_id);
    }
}
