//! Captured events as handed over by the capture layer.

use libp2p::PeerId;
use web_time::SystemTime;

use crate::{BitswapMessage, ConnectionEvent};

/// Capture time and remote peer attached to every dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventEnvelope {
    pub timestamp: SystemTime,
    pub peer: PeerId,
}

impl EventEnvelope {
    pub fn new(timestamp: SystemTime, peer: PeerId) -> Self {
        Self { timestamp, peer }
    }

    /// Envelope stamped with the current wall-clock time.
    pub fn now(peer: PeerId) -> Self {
        Self::new(SystemTime::now(), peer)
    }
}

/// The two kinds of events the monitor distributes.
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    BitswapMessage(BitswapMessage),
    ConnectionEvent(ConnectionEvent),
}

impl From<BitswapMessage> for Event {
    fn from(message: BitswapMessage) -> Self {
        Self::BitswapMessage(message)
    }
}

impl From<ConnectionEvent> for Event {
    fn from(event: ConnectionEvent) -> Self {
        Self::ConnectionEvent(event)
    }
}

impl Event {
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// One decoded event together with its envelope.
///
/// Serialized flat: `{"timestamp": .., "peer": .., "event": ..}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapturedEvent {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub envelope: EventEnvelope,
    pub event: Event,
}

impl CapturedEvent {
    pub fn new(envelope: EventEnvelope, event: impl Into<Event>) -> Self {
        Self {
            envelope,
            event: event.into(),
        }
    }
}
