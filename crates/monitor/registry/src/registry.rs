//! Set of active subscribers keyed by their identifier.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::SubscriptionError;
use crate::metrics::RegistryMetrics;
use crate::subscriber::EventSubscriber;

/// Frozen list of subscribers taken for one dispatch.
pub type SubscriberSnapshot = Vec<Arc<dyn EventSubscriber>>;

/// Active subscribers, at most one per identifier (all operations Mutex-protected).
///
/// Instance-scoped: the hosting application constructs and owns it. The
/// registry keeps an `Arc` to each subscriber only between a successful
/// [`subscribe`](Self::subscribe) and the matching
/// [`unsubscribe`](Self::unsubscribe).
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<String, Arc<dyn EventSubscriber>>>,
    metrics: RegistryMetrics,
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `subscriber` under its identifier.
    ///
    /// Fails if the identifier is already active; the existing entry is left
    /// untouched.
    pub fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) -> Result<(), SubscriptionError> {
        let id = subscriber.id().to_owned();
        let mut subscribers = self.subscribers.lock();

        match subscribers.entry(id) {
            Entry::Occupied(entry) => {
                self.metrics.rejected_total.increment(1);
                debug!(subscriber = %entry.key(), "Rejected duplicate subscription");
                Err(SubscriptionError::AlreadySubscribed {
                    id: entry.key().clone(),
                })
            }
            Entry::Vacant(entry) => {
                debug!(subscriber = %entry.key(), "Subscriber added");
                entry.insert(subscriber);
                self.metrics.subscriptions_total.increment(1);
                self.metrics.set_active(subscribers.len());
                Ok(())
            }
        }
    }

    /// Remove the entry registered under `subscriber`'s identifier.
    ///
    /// Idempotent: unknown or already removed identifiers are ignored.
    pub fn unsubscribe(&self, subscriber: &dyn EventSubscriber) {
        self.unsubscribe_id(subscriber.id());
    }

    /// Remove the entry registered under `id`. Returns whether one was removed.
    pub fn unsubscribe_id(&self, id: &str) -> bool {
        let mut subscribers = self.subscribers.lock();

        if subscribers.remove(id).is_none() {
            return false;
        }

        self.metrics.unsubscriptions_total.increment(1);
        self.metrics.set_active(subscribers.len());
        debug!(subscriber = %id, "Subscriber removed");
        true
    }

    /// No-op health check.
    pub fn ping(&self) {}

    /// Copy of the active subscriber set, taken under the lock.
    ///
    /// Handlers are invoked on the copy so the lock is never held while
    /// subscriber code runs.
    pub fn snapshot(&self) -> SubscriberSnapshot {
        self.subscribers.lock().values().cloned().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.subscribers.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<String> {
        self.subscribers.lock().keys().cloned().collect()
    }
}
