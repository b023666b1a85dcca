#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bsmon_primitives::{BitswapMessage, ConnectionEvent, PeerId};
use bsmon_registry::EventSubscriber;
use parking_lot::Mutex;
use web_time::SystemTime;

pub fn test_peer_id(n: u8) -> PeerId {
    let bytes = [n; 32];
    let key = libp2p::identity::ed25519::SecretKey::try_from_bytes(bytes).unwrap();
    let keypair = libp2p::identity::Keypair::from(libp2p::identity::ed25519::Keypair::from(key));
    keypair.public().to_peer_id()
}

pub type MessageCall = (SystemTime, PeerId, BitswapMessage);
pub type ConnectionCall = (SystemTime, PeerId, ConnectionEvent);

/// Records every handler invocation with its exact arguments.
#[derive(Debug)]
pub struct Recorder {
    id: String,
    messages: Mutex<Vec<MessageCall>>,
    connections: Mutex<Vec<ConnectionCall>>,
}

impl Recorder {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            messages: Mutex::default(),
            connections: Mutex::default(),
        })
    }

    pub fn messages(&self) -> Vec<MessageCall> {
        self.messages.lock().clone()
    }

    pub fn connections(&self) -> Vec<ConnectionCall> {
        self.connections.lock().clone()
    }
}

impl EventSubscriber for Recorder {
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

/// Counts deliveries without keeping them.
#[derive(Debug)]
pub struct Counter {
    id: String,
    pub messages: AtomicUsize,
    pub connections: AtomicUsize,
}

impl Counter {
    pub fn new(id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: id.into(),
            messages: AtomicUsize::new(0),
            connections: AtomicUsize::new(0),
        })
    }

    pub fn message_count(&self) -> usize {
        self.messages.load(Ordering::SeqCst)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl EventSubscriber for Counter {
    fn id(&self) -> &str {
        &self.id
    }

    fn bitswap_message_received(&self, _: SystemTime, _: PeerId, _: &BitswapMessage) {
        self.messages.fetch_add(1, Ordering::SeqCst);
    }

    fn connection_event_recorded(&self, _: SystemTime, _: PeerId, _: &ConnectionEvent) {
        self.connections.fetch_add(1, Ordering::SeqCst);
    }
}

/// Panics on every invocation.
#[derive(Debug)]
pub struct Faulty {
    id: String,
}

impl Faulty {
    pub fn new(id: &str) -> Arc<Self> {
        Arc::new(Self { id: id.to_string() })
    }
}

impl EventSubscriber for Faulty {
    fn id(&self) -> &str {
        &self.id
    }

    fn bitswap_message_received(&self, _: SystemTime, _: PeerId, _: &BitswapMessage) {
        panic!("faulty message handler");
    }

    fn connection_event_recorded(&self, _: SystemTime, _: PeerId, _: &ConnectionEvent) {
        panic!("faulty connection handler");
    }
}
