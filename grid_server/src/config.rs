//! Service configuration loaded from TOML

use anyhow::{bail, Context, Result};
use grid_forecast::MetricPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level `gridflow.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub weather: WeatherSettings,
    /// Overrides for the metric constants; omitted fields keep their defaults
    pub policy: MetricPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_series_path")]
    pub series_path: PathBuf,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_region")]
    pub region: String,
}

/// Distribution of the simulated ambient temperature
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSettings {
    #[serde(default = "default_mean_c")]
    pub mean_c: f64,
    #[serde(default = "default_std_dev_c")]
    pub std_dev_c: f64,
    #[serde(default = "default_min_c")]
    pub min_c: f64,
    #[serde(default = "default_max_c")]
    pub max_c: f64,
    /// Fixed seed for reproducible runs; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8000
}

fn default_series_path() -> PathBuf {
    PathBuf::from("data/cleaned_demand.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/gridflow_model.json")
}

fn default_region() -> String {
    "Maharashtra".to_owned()
}

fn default_mean_c() -> f64 {
    32.0
}

fn default_std_dev_c() -> f64 {
    3.0
}

fn default_min_c() -> f64 {
    20.0
}

fn default_max_c() -> f64 {
    45.0
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            series_path: default_series_path(),
            model_path: default_model_path(),
            region: default_region(),
        }
    }
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            mean_c: default_mean_c(),
            std_dev_c: default_std_dev_c(),
            min_c: default_min_c(),
            max_c: default_max_c(),
            seed: None,
        }
    }
}

impl ServerSettings {
    /// `host:port` string handed to the listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            info!(path = %path.display(), "loading configuration");
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        let w = &self.weather;
        if !w.mean_c.is_finite() {
            bail!("weather.mean_c must be a finite temperature");
        }
        if !(w.std_dev_c.is_finite() && w.std_dev_c >= 0.0) {
            bail!("weather.std_dev_c must be a non-negative number");
        }
        if !(w.min_c.is_finite() && w.max_c.is_finite() && w.min_c <= w.max_c) {
            bail!("weather.min_c must not exceed weather.max_c");
        }
        if self.data.region.trim().is_empty() {
            bail!("data.region must be set");
        }
        Ok(())
    }
}
