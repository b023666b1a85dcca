//! Ready-made subscribers.
//!
//! - [`LoggingSubscriber`] writes every event to the `tracing` log.
//! - [`ChannelSubscriber`] forwards events into a bounded queue for an async
//!   consumer. By default a full queue holds dispatch back instead of losing
//!   events.

mod channel;
mod logging;

pub use channel::{ChannelSubscriber, OverflowPolicy};
pub use logging::LoggingSubscriber;
