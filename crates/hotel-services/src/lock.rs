//! Per-room advisory locks
//!
//! One binary semaphore per room id, created lazily and retained for the
//! process lifetime. The registry is constructed at startup and passed by
//! `Arc` to whoever mutates bookings; it is advisory only and does not
//! replace the storage transaction's overlap check.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Registry of per-room mutual exclusion locks
pub struct RoomLockRegistry {
    locks: Mutex<HashMap<i32, Arc<Semaphore>>>,
    timeout: Duration,
}

impl RoomLockRegistry {
    /// Create a registry with the given acquisition timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    fn semaphore_for(&self, room_id: i32) -> Arc<Semaphore> {
        let mut locks = self.locks.lock();
        locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Semaphore::new(1)))
            .clone()
    }

    /// Try to acquire the lock for a room, waiting up to the configured
    /// timeout. Returns false when the room is busy; callers must treat
    /// that as "try again shortly", not as an error.
    pub async fn acquire(&self, room_id: i32) -> bool {
        let semaphore = self.semaphore_for(room_id);

        match tokio::time::timeout(self.timeout, semaphore.acquire_owned()).await {
            Ok(Ok(permit)) => {
                // Held until an explicit release(); the permit is restored
                // there rather than on drop.
                permit.forget();
                debug!("Acquired lock for room {}", room_id);
                true
            }
            Ok(Err(_)) => {
                // Semaphore closed; registry never closes semaphores.
                warn!("Lock semaphore for room {} unexpectedly closed", room_id);
                false
            }
            Err(_) => {
                debug!(
                    "Lock acquisition for room {} timed out after {:?}",
                    room_id, self.timeout
                );
                false
            }
        }
    }

    /// Release the lock for a room. Idempotent: releasing an unheld or
    /// already-released lock is a no-op and never blocks a future acquire.
    pub fn release(&self, room_id: i32) {
        let locks = self.locks.lock();
        if let Some(semaphore) = locks.get(&room_id) {
            if semaphore.available_permits() == 0 {
                semaphore.add_permits(1);
                debug!("Released lock for room {}", room_id);
            }
        }
    }

    /// Drop entries that are not currently held, bounding registry growth
    /// when room cardinality is large or dynamic.
    pub fn evict_idle(&self) -> usize {
        let mut locks = self.locks.lock();
        let before = locks.len();
        // An entry with outstanding clones belongs to an acquire() that has
        // not yet taken its permit; evicting it would hand the next caller a
        // fresh semaphore and two holders for the same room.
        locks.retain(|_, semaphore| {
            semaphore.available_permits() == 0 || Arc::strong_count(semaphore) > 1
        });
        before - locks.len()
    }

    /// Number of rooms with a registered lock entry
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.locks.lock().is_empty()
    }
}

impl Default for RoomLockRegistry {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_LOCK_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_registry() -> Arc<RoomLockRegistry> {
        Arc::new(RoomLockRegistry::new(Duration::from_millis(50)))
    }

    #[tokio::test]
    async fn test_acquire_and_release() {
        let registry = fast_registry();
        assert!(registry.acquire(101).await);
        registry.release(101);
        assert!(registry.acquire(101).await);
        registry.release(101);
    }

    #[tokio::test]
    async fn test_second_acquire_times_out() {
        let registry = fast_registry();
        assert!(registry.acquire(101).await);
        assert!(!registry.acquire(101).await);
        registry.release(101);
    }

    #[tokio::test]
    async fn test_concurrent_acquire_exactly_one_winner() {
        let registry = fast_registry();

        let a = {
            let r = registry.clone();
            tokio::spawn(async move { r.acquire(7).await })
        };
        let b = {
            let r = registry.clone();
            tokio::spawn(async move { r.acquire(7).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(a ^ b, "exactly one of two concurrent acquires must win");
        registry.release(7);
    }

    #[tokio::test]
    async fn test_rooms_are_independent() {
        let registry = fast_registry();
        assert!(registry.acquire(1).await);
        assert!(registry.acquire(2).await);
        registry.release(1);
        registry.release(2);
    }

    #[tokio::test]
    async fn test_release_is_idempotent() {
        let registry = fast_registry();

        // Releasing a never-acquired lock is a no-op.
        registry.release(999);

        assert!(registry.acquire(5).await);
        registry.release(5);
        registry.release(5);

        // A double release must not stack permits: two concurrent holders
        // would break mutual exclusion.
        assert!(registry.acquire(5).await);
        assert!(!registry.acquire(5).await);
        registry.release(5);
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_held_locks() {
        let registry = fast_registry();
        assert!(registry.acquire(1).await);
        registry.acquire(2).await;
        registry.release(2);

        let evicted = registry.evict_idle();
        assert_eq!(evicted, 1);
        assert_eq!(registry.len(), 1);

        // The held lock survived eviction and still excludes others.
        assert!(!registry.acquire(1).await);
        registry.release(1);
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_pending_acquires() {
        let registry = fast_registry();

        // A clone handed out by semaphore_for but not yet acquired stands
        // for an acquire() parked between the map lookup and the await.
        let pending = registry.semaphore_for(3);

        assert_eq!(registry.evict_idle(), 0);
        assert_eq!(registry.len(), 1);

        // The pending caller takes its permit on the surviving semaphore.
        pending.try_acquire().unwrap().forget();

        // The registry still routes room 3 to the same semaphore, so
        // mutual exclusion holds.
        assert!(!registry.acquire(3).await);
        registry.release(3);
        assert!(registry.acquire(3).await);
        registry.release(3);
    }
}
