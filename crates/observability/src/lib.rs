//! Logging for the Bitswap monitor.

mod args;
mod logging;

pub use args::LogArgs;
pub use logging::{build_filter, init_logging};
