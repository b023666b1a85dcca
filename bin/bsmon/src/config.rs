//! Configuration file handling.

use std::fs;
use std::path::Path;

use bsmon_observability::LogArgs;
use bsmon_registry::DispatchConfig;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Top-level configuration file.
///
/// ```toml
/// [dispatch]
/// strategy = "parallel"
/// channel_capacity = 4096
/// channel_overflow = "backpressure"
///
/// [log]
/// json = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MonitorConfig {
    pub(crate) dispatch: DispatchConfig,
    pub(crate) log: LogArgs,
}

impl MonitorConfig {
    /// Load from `path`, or use defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).wrap_err_with(|| format!("invalid config {}", path.display()))
    }
}
