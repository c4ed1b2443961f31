//! Per-round serialization locks.
//!
//! Every state transition on a round (adding a post, casting a vote,
//! closing a discussion or poll) runs its reload-decide-commit section
//! under the round's lock, so concurrent attempts serialize and the loser
//! of a close race observes the already-committed state on reload.
//!
//! Locks are keyed by round and created on demand. Entries are never
//! evicted; rounds are an audit trail and the registry stays proportional
//! to the number of rounds ever started.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;

use crate::domain::foundation::RoundId;

/// Registry of per-round async locks.
#[derive(Default)]
pub struct RoundLocks {
    locks: StdMutex<HashMap<RoundId, Arc<Mutex<()>>>>,
}

impl RoundLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for a round, creating it on first use.
    ///
    /// The registry mutex is held only for the map lookup, never across
    /// an await point.
    ///
    /// # Panics
    ///
    /// Panics if the registry mutex is poisoned.
    pub fn lock_for(&self, round_id: RoundId) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .expect("RoundLocks: registry poisoned")
            .entry(round_id)
            .or_default()
            .clone()
    }
}
