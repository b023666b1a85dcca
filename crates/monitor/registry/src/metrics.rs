//! Registry and dispatch metrics.

use metrics::{Counter, Gauge, Histogram};

/// Subscription bookkeeping metrics.
#[derive(Clone, Debug)]
pub(crate) struct RegistryMetrics {
    /// Successful subscriptions
    pub(crate) subscriptions_total: Counter,
    /// Subscriptions rejected because the identifier was taken
    pub(crate) rejected_total: Counter,
    /// Removals of an active subscriber
    pub(crate) unsubscriptions_total: Counter,
    /// Currently active subscribers
    pub(crate) active: Gauge,
}

impl Default for RegistryMetrics {
    fn default() -> Self {
        Self {
            subscriptions_total: metrics::counter!("bitswap_monitor.registry.subscriptions_total"),
            rejected_total: metrics::counter!("bitswap_monitor.registry.rejected_total"),
            unsubscriptions_total: metrics::counter!(
                "bitswap_monitor.registry.unsubscriptions_total"
            ),
            active: metrics::gauge!("bitswap_monitor.registry.active_subscribers"),
        }
    }
}

impl RegistryMetrics {
    pub(crate) fn set_active(&self, count: usize) {
        self.active.set(count as f64);
    }
}

/// Event fan-out metrics.
#[derive(Clone, Debug)]
pub(crate) struct DispatchMetrics {
    /// Bitswap messages dispatched
    pub(crate) messages_total: Counter,
    /// Connection events dispatched
    pub(crate) connection_events_total: Counter,
    /// Handler invocations that returned normally
    pub(crate) deliveries_total: Counter,
    /// Handler invocations that panicked
    pub(crate) handler_panics_total: Counter,
    /// Wall time of a whole dispatch call, handlers included
    pub(crate) dispatch_duration: Histogram,
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self {
            messages_total: metrics::counter!("bitswap_monitor.dispatch.messages_total"),
            connection_events_total: metrics::counter!(
                "bitswap_monitor.dispatch.connection_events_total"
            ),
            deliveries_total: metrics::counter!("bitswap_monitor.dispatch.deliveries_total"),
            handler_panics_total: metrics::counter!(
                "bitswap_monitor.dispatch.handler_panics_total"
            ),
            dispatch_duration: metrics::histogram!("bitswap_monitor.dispatch.duration_seconds"),
        }
    }
}
