//! Subscribers used by the unit tests.

use std::sync::Arc;

use bsmon_primitives::{BitswapMessage, ConnectionEvent};
use libp2p::PeerId;
use parking_lot::Mutex;
use web_time::SystemTime;

use crate::EventSubscriber;

pub(crate) fn test_peer_id(n: u8) -> PeerId {
    let bytes = [n; 32];
    let key = libp2p::identity::ed25519::SecretKey::try_from_bytes(bytes).unwrap();
    let keypair = libp2p::identity::Keypair::from(libp2p::identity::ed25519::Keypair::from(key));
    keypair.public().to_peer_id()
}

/// Ignores every event.
#[derive(Debug)]
pub(crate) struct NamedSubscriber(String);

impl NamedSubscriber {
    pub(crate) fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub(crate) fn arc(id: &str) -> Arc<Self> {
        Arc::new(Self::new(id))
    }
}

impl EventSubscriber for NamedSubscriber {
    fn id(&self) -> &str {
        &self.0
    }

    fn bitswap_message_received(&self, _: SystemTime, _: PeerId, _: &BitswapMessage) {}

    fn connection_event_recorded(&self, _: SystemTime, _: PeerId, _: &ConnectionEvent) {}
}

/// Records every delivery.
#[derive(Debug)]
pub(crate) struct RecordingSubscriber {
    id: String,
    messages: Mutex<Vec<(SystemTime, PeerId, BitswapMessage)>>,
    connections: Mutex<Vec<(SystemTime, PeerId, ConnectionEvent)>>,
}

impl RecordingSubscriber {
    pub(crate) fn arc(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            messages: Mutex::default(),
            connections: Mutex::default(),
        })
    }

    pub(crate) fn messages(&self) -> Vec<(SystemTime, PeerId, BitswapMessage)> {
        self.messages.lock().clone()
    }

    pub(crate) fn connections(&self) -> Vec<(SystemTime, PeerId, ConnectionEvent)> {
        self.connections.lock().clone()
    }
}

impl EventSubscriber for RecordingSubscriber {
    fn id(&self) -> &str {
        &self.id
    }

    fn bitswap_message_received(&self, timestamp: SystemTime, peer: PeerId, message: &BitswapMessage) {
        self.messages.lock().push((timestamp, peer, message.clone()));
    }

    fn connection_event_recorded(&self, timestamp: SystemTime, peer: PeerId, event: &ConnectionEvent) {
        self.connections.lock().push((timestamp, peer, event.clone()));
    }
}

/// Panics on every delivery.
#[derive(Debug)]
pub(crate) struct PanickingSubscriber(String);

impl PanickingSubscriber {
    pub(crate) fn arc(id: &str) -> Arc<Self> {
        Arc::new(Self(id.to_string()))
    }
}

impl EventSubscriber for PanickingSubscriber {
    fn id(&self) -> &str {
        &self.0
    }

    fn bitswap_message_received(&self, _: SystemTime, _: PeerId, _: &BitswapMessage) {
        panic!("message handler failure");
    }

    fn connection_event_recorded(&self, _: SystemTime, _: PeerId, _: &ConnectionEvent) {
        panic!("connection handler failure");
    }
}
