//! Connection lifecycle events.

use libp2p::Multiaddr;

/// Whether a connection to a remote peer was opened or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ConnectionEventType {
    Connected = 0,
    Disconnected = 1,
}

/// A connection opened or closed with the peer at `remote`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionEvent {
    pub remote: Multiaddr,
    #[cfg_attr(feature = "serde", serde(rename = "connection_event_type"))]
    pub kind: ConnectionEventType,
}

impl ConnectionEvent {
    pub fn connected(remote: Multiaddr) -> Self {
        Self {
            remote,
            kind: ConnectionEventType::Connected,
        }
    }

    pub fn disconnected(remote: Multiaddr) -> Self {
        Self {
            remote,
            kind: ConnectionEventType::Disconnected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.kind == ConnectionEventType::Connected
    }
}
