//! Decoded Bitswap monitoring events.
//!
//! The capture layer decodes wire traffic into these types; the monitor only
//! moves them around. Content identifiers and want-list entries are opaque
//! passthrough values.

mod cid;
mod connection;
mod event;
mod message;

pub use cid::{Cid, CidParseError};
pub use connection::{ConnectionEvent, ConnectionEventType};
pub use event::{CapturedEvent, Event, EventEnvelope};
pub use message::{BitswapMessage, BlockPresence, BlockPresenceType, WantType, WantlistEntry};

pub use libp2p::{Multiaddr, PeerId};
