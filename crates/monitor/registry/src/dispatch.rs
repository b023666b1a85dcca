//! Synchronous fan-out of captured events to the active subscribers.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use bsmon_primitives::{BitswapMessage, CapturedEvent, ConnectionEvent, Event, EventEnvelope};
use libp2p::PeerId;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};
use web_time::{Instant, SystemTime};

use crate::metrics::DispatchMetrics;
use crate::registry::SubscriberRegistry;
use crate::subscriber::EventSubscriber;
use crate::subscribers::OverflowPolicy;

/// Default queue size for channel-backed subscribers.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// How a single dispatch call reaches the subscribers in its snapshot.
///
/// Either way the call returns only after every handler has returned, so a
/// subscriber sees events from one caller in the order they were dispatched.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DispatchStrategy {
    /// One handler after another on the calling thread.
    #[default]
    Sequential,
    /// Handlers run concurrently on the rayon pool.
    Parallel,
}

/// Dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub strategy: DispatchStrategy,
    /// Queue size handed to [`ChannelSubscriber`](crate::ChannelSubscriber)s
    /// built from this configuration.
    pub channel_capacity: usize,
    /// Full-queue behaviour of channel subscribers built from this
    /// configuration.
    pub channel_overflow: OverflowPolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            strategy: DispatchStrategy::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            channel_overflow: OverflowPolicy::default(),
        }
    }
}

/// Delivers captured events to every subscriber active at dispatch time.
///
/// Each call takes a snapshot of the registry and releases the lock before
/// any handler runs. Subscribers removed before the snapshot never see the
/// event; subscribers added while handlers run may or may not. A panicking
/// handler is caught and logged, and never stops delivery to the others.
#[derive(Debug)]
pub struct EventDispatcher {
    registry: Arc<SubscriberRegistry>,
    strategy: DispatchStrategy,
    metrics: DispatchMetrics,
}

impl EventDispatcher {
    pub fn new(registry: Arc<SubscriberRegistry>, config: &DispatchConfig) -> Self {
        Self {
            registry,
            strategy: config.strategy,
            metrics: DispatchMetrics::default(),
        }
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    pub fn strategy(&self) -> DispatchStrategy {
        self.strategy
    }

    /// Deliver a Bitswap message received from `peer`.
    pub fn dispatch_message(&self, timestamp: SystemTime, peer: PeerId, message: &BitswapMessage) {
        self.metrics.messages_total.increment(1);
        self.deliver("bitswap_message", |subscriber| {
            subscriber.bitswap_message_received(timestamp, peer, message)
        });
    }

    /// Deliver a connection event for `peer`.
    pub fn dispatch_connection_event(
        &self,
        timestamp: SystemTime,
        peer: PeerId,
        event: &ConnectionEvent,
    ) {
        self.metrics.connection_events_total.increment(1);
        self.deliver("connection_event", |subscriber| {
            subscriber.connection_event_recorded(timestamp, peer, event)
        });
    }

    /// Route a captured event to the matching entry point.
    pub fn dispatch(&self, captured: &CapturedEvent) {
        let EventEnvelope { timestamp, peer } = captured.envelope;
        match &captured.event {
            Event::BitswapMessage(message) => self.dispatch_message(timestamp, peer, message),
            Event::ConnectionEvent(event) => self.dispatch_connection_event(timestamp, peer, event),
        }
    }

    fn deliver<F>(&self, kind: &'static str, handler: F)
    where
        F: Fn(&dyn EventSubscriber) + Sync,
    {
        let subscribers = self.registry.snapshot();
        if subscribers.is_empty() {
            trace!(kind, "No subscribers, event discarded");
            return;
        }

        let started = Instant::now();
        match self.strategy {
            DispatchStrategy::Sequential => {
                for subscriber in &subscribers {
                    self.invoke(kind, subscriber.as_ref(), &handler);
                }
            }
            DispatchStrategy::Parallel => {
                subscribers
                    .par_iter()
                    .for_each(|subscriber| self.invoke(kind, subscriber.as_ref(), &handler));
            }
        }
        self.metrics
            .dispatch_duration
            .record(started.elapsed().as_secs_f64());
    }

    fn invoke<F>(&self, kind: &'static str, subscriber: &dyn EventSubscriber, handler: &F)
    where
        F: Fn(&dyn EventSubscriber),
    {
        match panic::catch_unwind(AssertUnwindSafe(|| handler(subscriber))) {
            Ok(()) => self.metrics.deliveries_total.increment(1),
            Err(payload) => {
                self.metrics.handler_panics_total.increment(1);
                warn!(
                    subscriber = %subscriber.id(),
                    kind,
                    panic = %panic_message(payload.as_ref()),
                    "Subscriber handler panicked"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
