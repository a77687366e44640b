//! Broadcast of configuration reloads to every interested component.
//!
//! Components that need configuration implement [`ConfigurationConsumer`]
//! and register once, at construction, with the [`ReloadRegistry`] they are
//! handed by the composition root. A later [`ReloadRegistry::reload`] pushes
//! the new snapshot to every registered consumer, synchronously and in
//! registration order.
//!
//! # Failure policy
//!
//! A consumer that fails to apply a snapshot does not stop the broadcast:
//! every remaining consumer is still notified, and the failures are then
//! returned together as [`ReloadError::ConsumerNotificationFailed`].
//!
//! # Re-entrancy
//!
//! A consumer's [`on_reload`](ConfigurationConsumer::on_reload) must not
//! call [`ReloadRegistry::reload`] on the same registry. This is not
//! checked at runtime. Registering a new consumer from inside a callback is
//! safe; the newcomer receives the next reload, not the current one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::config::CaveSpawnConfig;
use crate::snapshot::{ConfigurationSnapshot, SnapshotError};

/// Error reported by a consumer that could not apply a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConsumerError {
    message: String,
}

impl ConsumerError {
    /// Create a consumer error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A component that follows configuration reloads.
pub trait ConfigurationConsumer: Send + Sync {
    /// Short name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Apply a newly published snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ConsumerError`] if the consumer cannot use the snapshot.
    /// The consumer is expected to keep its previous snapshot in that case.
    fn on_reload(&self, snapshot: &Arc<ConfigurationSnapshot>) -> Result<(), ConsumerError>;
}

/// Opaque handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConsumerId(u64);

impl fmt::Display for ConsumerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "consumer-{}", self.0)
    }
}

/// One consumer that failed during a broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerFailure {
    /// Registration handle of the failed consumer.
    pub id: ConsumerId,
    /// Name the consumer reported.
    pub name: String,
    /// What went wrong.
    pub error: ConsumerError,
}

/// Errors returned by a reload.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The raw configuration was rejected; no consumer was notified.
    #[error("configuration invalid: {source}")]
    Invalid {
        /// The validation failure.
        #[from]
        source: SnapshotError,
    },

    /// Every consumer was notified, but some failed to apply the snapshot.
    #[error("{} of {total} consumers failed to apply the reload", .failures.len())]
    ConsumerNotificationFailed {
        /// Number of consumers notified.
        total: usize,
        /// The consumers that failed, in registration order.
        failures: Vec<ConsumerFailure>,
    },
}

struct Registration {
    id: ConsumerId,
    consumer: Arc<dyn ConfigurationConsumer>,
}

/// Registry of configuration consumers.
///
/// One instance is created by the composition root and shared (by
/// reference or `Arc`) with every component that must follow reloads.
#[derive(Default)]
pub struct ReloadRegistry {
    consumers: Mutex<Vec<Registration>>,
    next_id: AtomicU64,
}

impl fmt::Debug for ReloadRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadRegistry")
            .field("consumers", &self.len())
            .finish_non_exhaustive()
    }
}

impl ReloadRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer for all future reloads.
    ///
    /// Each component registers itself exactly once, when it is built.
    pub fn register(&self, consumer: Arc<dyn ConfigurationConsumer>) -> ConsumerId {
        let id = ConsumerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(consumer = consumer.name(), %id, "Registered configuration consumer");
        self.lock().push(Registration { id, consumer });
        id
    }

    /// Number of registered consumers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no consumer is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Push `snapshot` to every registered consumer.
    ///
    /// Consumers are called in registration order, each with the same
    /// `Arc`. Returns that `Arc` on success.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::ConsumerNotificationFailed`] after all
    /// consumers have been called if any of them failed.
    pub fn reload(
        &self,
        snapshot: impl Into<Arc<ConfigurationSnapshot>>,
    ) -> Result<Arc<ConfigurationSnapshot>, ReloadError> {
        let snapshot = snapshot.into();

        // Copy the list so callbacks run without the lock held.
        let targets: Vec<(ConsumerId, Arc<dyn ConfigurationConsumer>)> = self
            .lock()
            .iter()
            .map(|r| (r.id, Arc::clone(&r.consumer)))
            .collect();

        info!(consumers = targets.len(), "Broadcasting configuration reload");

        let mut failures = Vec::new();
        for (id, consumer) in &targets {
            if let Err(error) = consumer.on_reload(&snapshot) {
                warn!(
                    consumer = consumer.name(),
                    %id,
                    error = %error,
                    "Consumer failed to apply reload, continuing"
                );
                failures.push(ConsumerFailure {
                    id: *id,
                    name: consumer.name().to_owned(),
                    error,
                });
            }
        }

        if failures.is_empty() {
            Ok(snapshot)
        } else {
            Err(ReloadError::ConsumerNotificationFailed {
                total: targets.len(),
                failures,
            })
        }
    }

    /// Validate a raw configuration, then [`reload`](Self::reload) it.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::Invalid`] without notifying anyone if the
    /// configuration is rejected, otherwise whatever
    /// [`reload`](Self::reload) returns.
    pub fn reload_config(
        &self,
        config: &CaveSpawnConfig,
    ) -> Result<Arc<ConfigurationSnapshot>, ReloadError> {
        let snapshot = ConfigurationSnapshot::from_config(config).inspect_err(|e| {
            warn!(error = %e, "Rejected configuration reload, keeping previous snapshot");
        })?;
        self.reload(snapshot)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Registration>> {
        // Pushes are the only writes; a poisoned list is still consistent.
        self.consumers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
