//! The monitor API exposed to subscriber clients and the capture layer.

use std::sync::Arc;

use bsmon_primitives::{BitswapMessage, CapturedEvent, ConnectionEvent};
use libp2p::PeerId;
use web_time::SystemTime;

use crate::dispatch::{DispatchConfig, EventDispatcher};
use crate::error::SubscriptionError;
use crate::registry::SubscriberRegistry;
use crate::subscriber::EventSubscriber;

/// Operations offered to subscriber clients.
///
/// A transport adapter that exposes the monitor remotely implements its
/// endpoints on top of this trait.
#[auto_impl::auto_impl(&, Arc)]
pub trait MonitorApi: Send + Sync {
    /// Add a subscriber. Fails if its identifier is already subscribed.
    fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) -> Result<(), SubscriptionError>;

    /// Remove a subscriber. Safe to call any number of times.
    fn unsubscribe(&self, subscriber: &dyn EventSubscriber);

    /// No-op, used to check that the service is reachable.
    fn ping(&self);
}

impl MonitorApi for SubscriberRegistry {
    fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) -> Result<(), SubscriptionError> {
        SubscriberRegistry::subscribe(self, subscriber)
    }

    fn unsubscribe(&self, subscriber: &dyn EventSubscriber) {
        SubscriberRegistry::unsubscribe(self, subscriber)
    }

    fn ping(&self) {
        SubscriberRegistry::ping(self)
    }
}

/// One registry and the dispatcher feeding from it.
///
/// Cheap to clone; clones share the same subscriber set.
#[derive(Debug, Clone)]
pub struct MonitorService {
    registry: Arc<SubscriberRegistry>,
    dispatcher: Arc<EventDispatcher>,
}

impl Default for MonitorService {
    fn default() -> Self {
        Self::new(&DispatchConfig::default())
    }
}

impl MonitorService {
    pub fn new(config: &DispatchConfig) -> Self {
        let registry = Arc::new(SubscriberRegistry::new());
        let dispatcher = Arc::new(EventDispatcher::new(registry.clone(), config));
        Self {
            registry,
            dispatcher,
        }
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    pub fn dispatch_message(&self, timestamp: SystemTime, peer: PeerId, message: &BitswapMessage) {
        self.dispatcher.dispatch_message(timestamp, peer, message);
    }

    pub fn dispatch_connection_event(
        &self,
        timestamp: SystemTime,
        peer: PeerId,
        event: &ConnectionEvent,
    ) {
        self.dispatcher
            .dispatch_connection_event(timestamp, peer, event);
    }

    pub fn dispatch(&self, captured: &CapturedEvent) {
        self.dispatcher.dispatch(captured);
    }
}

impl MonitorApi for MonitorService {
    fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) -> Result<(), SubscriptionError> {
        self.registry.subscribe(subscriber)
    }

    fn unsubscribe(&self, subscriber: &dyn EventSubscriber) {
        self.registry.unsubscribe(subscriber);
    }

    fn ping(&self) {
        self.registry.ping();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{RecordingSubscriber, test_peer_id};

    #[test]
    fn test_clones_share_registry() {
        let service = MonitorService::default();
        let clone = service.clone();
        let sub = RecordingSubscriber::arc("a");

        MonitorApi::subscribe(&clone, sub.clone()).unwrap();
        assert!(service.registry().contains("a"));

        service.dispatch_message(SystemTime::now(), test_peer_id(1), &BitswapMessage::default());
        assert_eq!(sub.messages().len(), 1);

        MonitorApi::unsubscribe(&service, &sub);
        assert!(clone.registry().is_empty());
    }

    #[test]
    fn test_api_through_trait_object() {
        let service = MonitorService::default();
        let api: Arc<dyn MonitorApi> = Arc::new(service.clone());

        api.ping();
        api.subscribe(RecordingSubscriber::arc("a")).unwrap();
        assert!(api.subscribe(RecordingSubscriber::arc("a")).is_err());
        assert_eq!(service.registry().len(), 1);
    }
}
