//! Configuration management for measurement and device defaults
//!
//! This module provides runtime configuration loading from JSON files so a
//! household can pin its own threshold, adjustment, or board name without
//! passing flags every time. Command-line flags override these values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::device::BOARD_DEVICE_NAME;
use crate::measurement::{MeasurementSettings, DEFAULT_SAMPLE_TARGET, DEFAULT_THRESHOLD_KG};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "weii.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub measurement: MeasurementConfig,
    pub device: DeviceConfig,
}

/// Session parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Minimum total weight (kg) that counts as someone on the board
    pub threshold_kg: f64,
    /// Samples after which a session ends even if the user stays on
    pub sample_target: usize,
    /// Offset added to every result, e.g. to match another scale
    pub adjust_kg: f64,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            threshold_kg: DEFAULT_THRESHOLD_KG,
            sample_target: DEFAULT_SAMPLE_TARGET,
            adjust_kg: 0.0,
        }
    }
}

impl MeasurementConfig {
    pub fn to_settings(&self) -> MeasurementSettings {
        MeasurementSettings {
            adjust: self.adjust_kg,
            threshold: self.threshold_kg,
            target: self.sample_target,
        }
    }
}

/// Board discovery parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Input device name to match exactly
    pub name: String,
    /// Delay between discovery scans in milliseconds
    pub discovery_poll_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: BOARD_DEVICE_NAME.to_string(),
            discovery_poll_ms: 500,
        }
    }
}

impl DeviceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.discovery_poll_ms)
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or defaults if the file is missing or the
    /// JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load `weii.json` from the working directory if it exists
    pub fn load() -> Self {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_from_file(DEFAULT_CONFIG_FILE)
        } else {
            Self::default()
        }
    }
}
