//! Tunable economy constants.
//!
//! Loaded from a RON file named by `QUANTUM_CLICKER_CONFIG`; anything missing
//! from the file falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "QUANTUM_CLICKER_CONFIG";
pub const DEFAULT_SAVE_FILE: &str = "quantum_clicker.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Geometric cost growth per factory unit bought.
    pub cost_growth: f64,
    /// Lifetime Qubits required per prestige point.
    pub prestige_threshold: f64,
    /// Threshold used once the Quick Reset prestige upgrade is owned.
    pub quick_reset_threshold: f64,
    pub prestige_bonus_per_point: f64,
    /// Bits per click after a prestige, before the prestige multiplier.
    pub base_bits_per_click: f64,
    /// Qubits per click granted when Qubits are unlocked.
    pub quantum_seed_per_click: f64,
    pub offline_cap_hours: u64,
    pub extended_offline_cap_hours: u64,
    pub offline_efficiency: f64,
    pub tick_interval_ms: u64,
    pub save_path: PathBuf,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            cost_growth: 1.2,
            prestige_threshold: 1e12,
            quick_reset_threshold: 1e6,
            prestige_bonus_per_point: 0.1,
            base_bits_per_click: 0.1,
            quantum_seed_per_click: 1.0,
            offline_cap_hours: 8,
            extended_offline_cap_hours: 10,
            offline_efficiency: 0.5,
            tick_interval_ms: 1_000,
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl EconomyConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn offline_cap(&self, extended: bool) -> Duration {
        let hours = if extended {
            self.extended_offline_cap_hours
        } else {
            self.offline_cap_hours
        };
        Duration::from_secs(hours * 3_600)
    }
}

/// Resolve the config from the environment, falling back to defaults when the
/// variable is unset or the file cannot be used.
pub fn load_config_from_env() -> EconomyConfig {
    let Some(path) = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) else {
        tracing::info!(target: "quantum_clicker::config", "config.loaded=builtin");
        return EconomyConfig::default();
    };
    match EconomyConfig::from_file(&path) {
        Ok(config) => {
            tracing::info!(
                target: "quantum_clicker::config",
                path = %path.display(),
                "config.loaded=file"
            );
            config
        }
        Err(err) => {
            tracing::warn!(
                target: "quantum_clicker::config",
                path = %path.display(),
                error = %err,
                "config.load_failed"
            );
            EconomyConfig::default()
        }
    }
}
