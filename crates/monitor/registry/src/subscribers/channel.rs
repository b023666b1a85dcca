use std::sync::atomic::{AtomicU64, Ordering};

use bsmon_primitives::{BitswapMessage, CapturedEvent, ConnectionEvent, EventEnvelope};
use libp2p::PeerId;
use metrics::Counter;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use web_time::SystemTime;

use crate::{DispatchConfig, EventSubscriber};

/// What a [`ChannelSubscriber`] does when its queue is full.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverflowPolicy {
    /// Wait for the consumer to make room. Lossless.
    ///
    /// The handler blocks the dispatching thread, so dispatch must not run on
    /// a thread driving an async runtime.
    #[default]
    Backpressure,
    /// Drop the event for this subscriber and count it.
    DropNewest,
}

/// Forwards events into a bounded tokio channel.
///
/// Events that enter the queue keep their dispatch order. With the default
/// [`OverflowPolicy::Backpressure`] every event is queued exactly once.
#[derive(Debug)]
pub struct ChannelSubscriber {
    id: String,
    tx: mpsc::Sender<CapturedEvent>,
    overflow: OverflowPolicy,
    dropped: AtomicU64,
    dropped_total: Counter,
}

impl ChannelSubscriber {
    /// Create a lossless subscriber and the receiving end of its queue.
    ///
    /// `capacity` is clamped to at least 1.
    pub fn new(id: impl Into<String>, capacity: usize) -> (Self, mpsc::Receiver<CapturedEvent>) {
        Self::with_overflow(id, capacity, OverflowPolicy::default())
    }

    /// Create a subscriber sized and configured from `config`.
    pub fn from_config(
        id: impl Into<String>,
        config: &DispatchConfig,
    ) -> (Self, mpsc::Receiver<CapturedEvent>) {
        Self::with_overflow(id, config.channel_capacity, config.channel_overflow)
    }

    pub fn with_overflow(
        id: impl Into<String>,
        capacity: usize,
        overflow: OverflowPolicy,
    ) -> (Self, mpsc::Receiver<CapturedEvent>) {
        let id = id.into();
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let dropped_total =
            metrics::counter!("bitswap_monitor.channel.dropped_total", "subscriber" => id.clone());
        let subscriber = Self {
            id,
            tx,
            overflow,
            dropped: AtomicU64::new(0),
            dropped_total,
        };
        (subscriber, rx)
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Events dropped because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// True once the receiver has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn forward(&self, captured: CapturedEvent) {
        match self.overflow {
            OverflowPolicy::Backpressure => {
                if self.tx.blocking_send(captured).is_err() {
                    debug!(subscriber = %self.id, "Subscriber queue closed");
                }
            }
            OverflowPolicy::DropNewest => match self.tx.try_send(captured) {
                Ok(()) => {}
                Err(TrySendError::Full(captured)) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    self.dropped_total.increment(1);
                    warn!(
                        subscriber = %self.id,
                        kind = captured.event.kind(),
                        "Subscriber queue full, dropping event"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(subscriber = %self.id, "Subscriber queue closed");
                }
            },
        }
    }
}

impl EventSubscriber for ChannelSubscriber {
    fn id(&self) -> &str {
        &self.id
    }

    fn bitswap_message_received(&self, timestamp: SystemTime, peer: PeerId, message: &BitswapMessage) {
        self.forward(CapturedEvent::new(
            EventEnvelope::new(timestamp, peer),
            message.clone(),
        ));
    }

    fn connection_event_recorded(&self, timestamp: SystemTime, peer: PeerId, event: &ConnectionEvent) {
        self.forward(CapturedEvent::new(
            EventEnvelope::new(timestamp, peer),
            event.clone(),
        ));
    }
}
