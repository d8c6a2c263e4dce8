use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};
use tracing::info;

pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/mardoin/mardoin/main/tfc_leads_with_coordinates.csv";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub map: MapConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    /// http(s) URL or local path of the leads CSV
    pub data_url: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
        }
    }
}

/// Map view settings. The center and zoom are fixed; they are never fitted to
/// the points being shown.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub style: String,
    pub marker_size: u32,
    pub marker_opacity: f64,
    pub marker_color: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 38.0,
            center_lon: -95.0,
            zoom: 3,
            style: "carto-positron".to_string(),
            marker_size: 8,
            marker_opacity: 0.7,
            marker_color: "blue".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            static_dir: PathBuf::from("assets"),
            max_sessions: 1024,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Like `load_from_file`, but a missing file means "use the defaults".
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}
