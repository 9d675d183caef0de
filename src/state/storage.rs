//! Session storage
//!
//! In-process store of per-user dialogue sessions. Each user owns one
//! slot guarded by its own async mutex: holding the slot lock while an
//! event is handled serializes that user's events in arrival order,
//! while different users proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::state::session::Session;

type Slot = Arc<AsyncMutex<Option<Session>>>;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slots: Arc<Mutex<HashMap<i64, Slot>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the session slot for a user, creating an empty one on first
    /// contact. The returned guard must be held for the whole handling
    /// of the user's event.
    pub async fn lock(&self, user_id: i64) -> OwnedMutexGuard<Option<Session>> {
        let slot = {
            let mut slots = self
                .slots
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            slots.entry(user_id).or_default().clone()
        };
        slot.lock_owned().await
    }

    /// Number of users currently inside a dialogue. A slot locked by an
    /// in-flight event counts as active.
    pub fn active_sessions(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .values()
            .filter(|slot| slot.try_lock().map(|s| s.is_some()).unwrap_or(true))
            .count()
    }
}
