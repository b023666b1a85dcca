//! Subscriber registry and event fan-out for Bitswap monitoring.
//!
//! ```text
//!  capture layer                       subscriber clients
//!       │                                  │       ▲
//!       │ dispatch_*()          subscribe() │       │ handler calls
//!       ▼                     unsubscribe() ▼       │
//!  EventDispatcher ── snapshot() ──► SubscriberRegistry
//!       │                                           │
//!       └──────── for each subscriber in snapshot ──┘
//! ```
//!
//! The registry holds at most one subscriber per identifier. Dispatch copies
//! the active set under the lock, releases it, and calls each handler on the
//! copy. Handlers are blocking and panics in them are contained per
//! subscriber.

mod dispatch;
mod error;
mod metrics;
mod registry;
mod service;
mod subscriber;
pub mod subscribers;

#[cfg(test)]
mod test_utils;

pub use dispatch::{DEFAULT_CHANNEL_CAPACITY, DispatchConfig, DispatchStrategy, EventDispatcher};
pub use error::SubscriptionError;
pub use registry::{SubscriberRegistry, SubscriberSnapshot};
pub use service::{MonitorApi, MonitorService};
pub use subscriber::EventSubscriber;
pub use subscribers::{ChannelSubscriber, LoggingSubscriber, OverflowPolicy};
