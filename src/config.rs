//! Configuration and CLI argument handling

use std::{env, fs, path::{Path, PathBuf}};

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "bright-aware")]
#[command(about = "A sun-exposure advisory server with sunscreen reapplication timers")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5050")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Answer every UV lookup with this index instead of failing
    #[arg(long)]
    pub simulate_uv: Option<f64>,

    /// Report sunset as imminent for simulated lookups
    #[arg(long, requires = "simulate_uv")]
    pub simulate_sunset: bool,

    /// Runtime asset configuration file
    #[arg(long, default_value = "config.json")]
    pub assets_config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Image paths served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub logo1: String,
    pub logo2: String,
    pub uv_chart: String,
    pub cancer_chart: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            logo1: "/images/logo1.png".to_string(),
            logo2: "/images/logo2.png".to_string(),
            uv_chart: "/images/state-uvi-chart.png".to_string(),
            cancer_chart: "/images/skin-cancer-chart.jpg".to_string(),
        }
    }
}

/// Partial overrides read from the runtime file
#[derive(Debug, Default, Deserialize)]
struct AssetOverrides {
    #[serde(default)]
    images: ImageOverrides,
}

#[derive(Debug, Default, Deserialize)]
struct ImageOverrides {
    logo1: Option<String>,
    logo2: Option<String>,
    uv_chart: Option<String>,
    cancer_chart: Option<String>,
}

impl AssetConfig {
    /// Resolve asset paths once at startup: defaults, then environment, then
    /// the runtime file if it exists and parses.
    pub fn load(path: &Path) -> Self {
        let mut config = Self::default();
        config.apply_env(|key| env::var(key).ok());

        match Self::read_overrides(path) {
            Ok(overrides) => {
                info!("Loaded asset configuration from {}", path.display());
                config.apply_overrides(overrides.images);
            }
            Err(e) => {
                info!("Using default configuration ({})", e);
            }
        }
        config
    }

    fn read_overrides(path: &Path) -> anyhow::Result<AssetOverrides> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            ("BRIGHTAWARE_LOGO1_PATH", &mut self.logo1),
            ("BRIGHTAWARE_LOGO2_PATH", &mut self.logo2),
            ("BRIGHTAWARE_UV_CHART_PATH", &mut self.uv_chart),
            ("BRIGHTAWARE_CANCER_CHART_PATH", &mut self.cancer_chart),
        ];
        for (key, slot) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                debug!("{} overrides asset path", key);
                *slot = value;
            }
        }
    }

    fn apply_overrides(&mut self, images: ImageOverrides) {
        let fields = [
            (images.logo1, &mut self.logo1),
            (images.logo2, &mut self.logo2),
            (images.uv_chart, &mut self.uv_chart),
            (images.cancer_chart, &mut self.cancer_chart),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}
