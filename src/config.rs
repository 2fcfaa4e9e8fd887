use crate::stream::{DEFAULT_GROW_INCREMENT, DEFAULT_MAX_POINTS};
use eyre::{ensure, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "STREAM_DASHBOARD_CONFIG";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub stream: StreamConfig,
    pub server: ServerConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub initial_count: usize,
    pub max_points: usize,
    pub tick_interval_ms: u64,
    pub auto_start_delay_ms: u64,
    pub grow_increment: usize,
    /// Fixes the random source; unset draws from the OS.
    pub seed: Option<u64>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            initial_count: 10_000,
            max_points: DEFAULT_MAX_POINTS,
            tick_interval_ms: 100,
            auto_start_delay_ms: 1_000,
            grow_increment: DEFAULT_GROW_INCREMENT,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub default_count: usize,
    /// Larger `count` requests are clamped to this.
    pub max_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".into(),
            default_count: 10_000,
            max_count: 1_000_000,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .wrap_err_with(|| format!("invalid config {}", path.display()))?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_json(text: &str) -> eyre::Result<Self> {
        let config: Self = serde_json::from_str(text).wrap_err("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file named by `STREAM_DASHBOARD_CONFIG`, or the defaults
    /// when it is unset.
    pub fn from_env() -> eyre::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> eyre::Result<()> {
        ensure!(self.stream.max_points > 0, "stream.max_points must be positive");
        ensure!(
            self.stream.tick_interval_ms > 0,
            "stream.tick_interval_ms must be positive"
        );
        Ok(())
    }
}
