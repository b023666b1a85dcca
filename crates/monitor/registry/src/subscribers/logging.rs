use bsmon_primitives::{BitswapMessage, ConnectionEvent};
use libp2p::PeerId;
use web_time::SystemTime;

use crate::EventSubscriber;

/// Logs every event it receives.
#[derive(Debug, Clone)]
pub struct LoggingSubscriber {
    id: String,
}

impl LoggingSubscriber {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl EventSubscriber for LoggingSubscriber {
    fn id(&self) -> &str {
        &self.id
    }

    fn bitswap_message_received(&self, timestamp: SystemTime, peer: PeerId, message: &BitswapMessage) {
        tracing::debug!(
            subscriber = %self.id,
            ?timestamp,
            %peer,
            entries = message.wantlist_entries.len(),
            cancels = message.cancel_count(),
            full_wantlist = message.full_wantlist,
            blocks = message.blocks.len(),
            presences = message.block_presences.len(),
            "Bitswap message received"
        );
    }

    fn connection_event_recorded(&self, timestamp: SystemTime, peer: PeerId, event: &ConnectionEvent) {
        tracing::info!(
            subscriber = %self.id,
            ?timestamp,
            %peer,
            remote = %event.remote,
            kind = %event.kind,
            "Connection event recorded"
        );
    }
}
