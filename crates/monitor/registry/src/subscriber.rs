//! The capability interface implemented by event consumers.

use bsmon_primitives::{BitswapMessage, ConnectionEvent};
use libp2p::PeerId;
use web_time::SystemTime;

/// A consumer of monitoring events.
///
/// Handlers are called synchronously from the dispatching thread and the
/// dispatch call does not return before they do. A handler that blocks stalls
/// delivery to its own subscriber (and, with the sequential strategy, to the
/// subscribers after it). Panics are caught by the dispatcher.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait EventSubscriber: Send + Sync {
    /// Identifier the registry keys this subscriber by.
    ///
    /// Must be unique among active subscribers. It may be reused once the
    /// previous holder has unsubscribed.
    fn id(&self) -> &str;

    /// Handles a Bitswap message received from `peer`.
    fn bitswap_message_received(&self, timestamp: SystemTime, peer: PeerId, message: &BitswapMessage);

    /// Handles a connection opened or closed with `peer`.
    fn connection_event_recorded(&self, timestamp: SystemTime, peer: PeerId, event: &ConnectionEvent);
}
