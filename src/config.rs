use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::search::DEFAULT_MAX_RESULTS;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            json_path: default_json_path(),
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("Alruqee.csv")
}
fn default_json_path() -> PathBuf {
    PathBuf::from("data.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            serve_static: default_serve_static(),
            static_dir: default_static_dir(),
            index_file: default_index_file(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_serve_static() -> bool {
    true
}
fn default_static_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_index_file() -> String {
    "index.html".to_string()
}

impl ServerConfig {
    /// `host:port` string handed to the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Loads `path` if it exists, otherwise falls back to built-in defaults.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            load_config(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Applies the `PORT` environment value on top of the file settings.
    pub fn apply_port_override(&mut self, port: Option<String>) -> Result<()> {
        if let Some(raw) = port {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(());
            }
            self.server.port = raw
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?;
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.search.max_results == 0 {
        anyhow::bail!("search.max_results must be >= 1");
    }

    if config.server.index_file.trim().is_empty() {
        anyhow::bail!("server.index_file must not be empty");
    }

    Ok(config)
}
