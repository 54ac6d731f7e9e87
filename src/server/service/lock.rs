//! Per-room-type reservation locks.
//!
//! This module provides `ReservationLocks`, the only process-wide mutable state in the
//! server. Each `(pg_id, room_type_id)` pair maps to its own async mutex, so reservations
//! for the same room type run their count-then-insert sequence one at a time while
//! unrelated room types proceed in parallel.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::OwnedMutexGuard;

type LockKey = (i32, i32);

/// Map of room type to async mutex, shared through `AppState`.
///
/// Cloning shares the same map. Entries are created on first use and kept for the
/// life of the process; there is one per room type ever reserved, which stays small.
#[derive(Clone, Default)]
pub struct ReservationLocks {
    locks: Arc<Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>>,
}

impl ReservationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a room type's reservation window.
    ///
    /// The returned guard releases the lock when dropped. The outer map lock is held
    /// only long enough to look up or insert the entry, never across an await.
    ///
    /// # Arguments
    /// - `pg_id` - Listing id
    /// - `room_type_id` - Room type id
    ///
    /// # Returns
    /// - `OwnedMutexGuard<()>` - Guard holding the room type's lock
    pub async fn acquire(&self, pg_id: i32, room_type_id: i32) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks
                .entry((pg_id, room_type_id))
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };

        lock.lock_owned().await
    }
}
