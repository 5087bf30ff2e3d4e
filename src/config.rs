use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::DecisionLogPolicy;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`
    #[default]
    File,
    /// Process memory only; state is lost on restart
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }

/// Remote grants registry; absent `base_url` means the static catalog and
/// the mock submission gateway are used
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 { 30 }
fn default_cache_size() -> u64 { 1000 }
fn default_cache_ttl_secs() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    #[serde(default = "default_industry_bonus")]
    pub industry_bonus: f64,
    #[serde(default = "default_need_bonus")]
    pub need_bonus: f64,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            industry_bonus: default_industry_bonus(),
            need_bonus: default_need_bonus(),
            min_score: default_min_score(),
            max_score: default_max_score(),
        }
    }
}

impl MatchingSettings {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            base: self.base_score,
            industry_bonus: self.industry_bonus,
            need_bonus: self.need_bonus,
            min_score: self.min_score,
            max_score: self.max_score,
        }
    }
}

fn default_base_score() -> f64 { 0.5 }
fn default_industry_bonus() -> f64 { 0.3 }
fn default_need_bonus() -> f64 { 0.1 }
fn default_min_score() -> f64 { 0.3 }
fn default_max_score() -> f64 { 1.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckSettings {
    #[serde(default)]
    pub decision_log: DecisionLogPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., CAPCUPID__SERVER__PORT -> server.port
    Environment::with_prefix("CAPCUPID")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with CAPCUPID__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}
