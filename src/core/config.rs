use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Runtime knobs. Every field is optional in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub spawn_interval_ms: u64,
    pub motion_interval_ms: u64,
    pub render_interval_ms: u64,
    /// Fixed seed for reproducible spawns; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 1000,
            motion_interval_ms: 50,
            render_interval_ms: 33,
            seed: None,
            sound: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing config json")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.spawn_interval_ms == 0 {
            bail!("spawn_interval_ms must be positive");
        }
        if self.motion_interval_ms == 0 {
            bail!("motion_interval_ms must be positive");
        }
        if self.render_interval_ms == 0 {
            bail!("render_interval_ms must be positive");
        }
        Ok(())
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn motion_interval(&self) -> Duration {
        Duration::from_millis(self.motion_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}
