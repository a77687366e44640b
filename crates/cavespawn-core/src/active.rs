//! The snapshot currently in effect for one consumer.
//!
//! [`ActiveSnapshot`] holds an `Arc` to an immutable
//! [`ConfigurationSnapshot`]. Readers take a cheap clone of the `Arc` and
//! release the lock before doing any work, so a decision in flight keeps
//! using the snapshot it started with while a reload publishes a new one.
//! A reader sees either the old snapshot in full or the new one in full.

use std::sync::{Arc, PoisonError, RwLock};

use crate::snapshot::ConfigurationSnapshot;

/// Atomically replaceable pointer to a [`ConfigurationSnapshot`].
#[derive(Debug)]
pub struct ActiveSnapshot {
    current: RwLock<Arc<ConfigurationSnapshot>>,
}

impl ActiveSnapshot {
    /// Start with `initial` in effect.
    pub const fn new(initial: Arc<ConfigurationSnapshot>) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// The snapshot in effect right now.
    pub fn load(&self) -> Arc<ConfigurationSnapshot> {
        // The guarded value is a single pointer; a panicked writer cannot
        // leave it half-written, so poisoning is ignored.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Publish `next`, returning the snapshot it replaced.
    pub fn store(&self, next: Arc<ConfigurationSnapshot>) -> Arc<ConfigurationSnapshot> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::config::CaveSpawnConfig;

    use super::*;

    fn snapshot_with_max_y(max_y: i32) -> Arc<ConfigurationSnapshot> {
        let mut config = CaveSpawnConfig::default();
        config.spawn_options.range.max_y = max_y;
        Arc::new(ConfigurationSnapshot::from_config(&config).unwrap())
    }

    #[test]
    fn load_returns_initial() {
        let initial = snapshot_with_max_y(-8);
        let active = ActiveSnapshot::new(Arc::clone(&initial));
        assert!(Arc::ptr_eq(&active.load(), &initial));
    }

    #[test]
    fn store_swaps_and_returns_previous() {
        let first = snapshot_with_max_y(-8);
        let second = snapshot_with_max_y(16);
        let active = ActiveSnapshot::new(Arc::clone(&first));

        let previous = active.store(Arc::clone(&second));
        assert!(Arc::ptr_eq(&previous, &first));
        assert_eq!(active.load().range().max_y(), 16);
    }

    #[test]
    fn loaded_snapshot_survives_replacement() {
        let active = ActiveSnapshot::new(snapshot_with_max_y(-8));
        let in_flight = active.load();
        active.store(snapshot_with_max_y(16));
        assert_eq!(in_flight.range().max_y(), -8);
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let active = ActiveSnapshot::new(snapshot_with_max_y(-8));
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        let max_y = active.load().range().max_y();
                        assert!(max_y == -8 || max_y == 16);
                    }
                });
            }
            scope.spawn(|| {
                for i in 0..200 {
                    let max_y = if i % 2 == 0 { 16 } else { -8 };
                    active.store(snapshot_with_max_y(max_y));
                }
            });
        });
    }
}
