//! Configuration loading for orgquiz.
//! Reads orgquiz.toml from the current directory or the path in ORGQUIZ_CONFIG.
//! Without either, built-in defaults are used.

use orgquiz_common::QuizSettings;
use orgquiz_db::DataPaths;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ORGQUIZ_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "orgquiz.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub quiz: QuizSettings,
}

// ── Server ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host()       -> String  { "127.0.0.1".to_string() }
fn default_port()       -> u16     { 3001 }
fn default_static_dir() -> PathBuf { PathBuf::from("static") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), static_dir: default_static_dir() }
    }
}

// ── Data files ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_reactions_path")]
    pub reactions_path: PathBuf,
    /// Separate compound list; compounds may also be embedded in reactions.
    #[serde(default)]
    pub compounds_path: Option<PathBuf>,
    #[serde(default)]
    pub nomenclature_path: Option<PathBuf>,
}

fn default_reactions_path() -> PathBuf { PathBuf::from("data/reactions.json") }

impl Default for DataConfig {
    fn default() -> Self {
        Self { reactions_path: default_reactions_path(), compounds_path: None, nomenclature_path: None }
    }
}

impl DataConfig {
    pub fn dataset_paths(&self) -> DataPaths {
        let paths = DataPaths::new(&self.reactions_path);
        match &self.compounds_path {
            Some(compounds) => paths.with_compounds(compounds),
            None => paths,
        }
    }
}

// ── Structure images ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Rendering service; images live at `<base_url>/<encoded structure>/image`.
    #[serde(default = "default_image_base_url")]
    pub base_url: String,
    /// Shown when the service cannot render a structure.
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
}

fn default_image_base_url() -> String { "https://cactus.nci.nih.gov/chemical/structure".to_string() }
fn default_fallback_url()   -> String { "/static/fallback-image.png".to_string() }

impl Default for ImageConfig {
    fn default() -> Self {
        Self { base_url: default_image_base_url(), fallback_url: default_fallback_url() }
    }
}

impl Config {
    /// Load configuration.
    /// Checks ORGQUIZ_CONFIG first (the file must then exist), then
    /// orgquiz.toml in the current directory, then falls back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !Path::new(&path).exists() {
                anyhow::bail!(
                    "Config file not found: {}\n\
                     Unset {} or point it at a copy of orgquiz.example.toml.",
                    path,
                    CONFIG_ENV
                );
            }
            return Self::from_file(Path::new(&path));
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_file(Path::new(DEFAULT_CONFIG_FILE));
        }

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.quiz.validate().map_err(|e| anyhow::anyhow!("Invalid [quiz] settings: {}", e))?;
        if self.images.base_url.trim().is_empty() {
            anyhow::bail!("images.base_url must not be empty");
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address {}: {}", addr, e))
    }
}
