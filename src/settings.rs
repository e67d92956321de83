//! Layered configuration: built-in defaults, an optional TOML file, then
//! `CWA_`-prefixed environment variables (`CWA_FEED__API_KEY`,
//! `CWA_STORAGE__DATABASE`, ...). `CWA_API_KEY` is accepted as a short form.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ForecastError, Result};
use crate::utils::constants::{
    DEFAULT_API_URL, DEFAULT_CACHE_FILE, DEFAULT_CACHE_MAX_AGE_SECS, DEFAULT_CONFIG_FILE,
    DEFAULT_DATABASE_FILE, DEFAULT_DATASET_ID, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_PREFIX,
    LOCATION_NAME_KEY,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub feed: FeedSettings,
    pub storage: StorageSettings,
    pub processing: ProcessingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    pub api_url: String,
    pub dataset_id: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Skip TLS certificate verification. The CWA endpoint has served
    /// certificate chains some platforms reject.
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub cache_file: PathBuf,
    /// Cached feeds at least this old are downloaded again. 0 disables the cache.
    pub cache_max_age_secs: u64,
    pub database: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingSettings {
    pub marker_key: String,
    pub max_workers: usize,
}

impl Settings {
    /// Load settings. An explicit `path` must exist; without one,
    /// `cwa-forecast.toml` in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ForecastError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                File::from(path).format(FileFormat::Toml).required(true)
            }
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let settings: Settings = Self::builder()?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings.with_env_api_key(std::env::var(ENV_API_KEY).ok()))
    }

    /// Defaults only; no file or environment lookups.
    pub fn defaults() -> Result<Self> {
        Ok(Self::builder()?.build()?.try_deserialize()?)
    }

    /// Parse settings from TOML text layered over the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let max_workers = i64::try_from(num_cpus::get()).unwrap_or(1);

        Ok(Config::builder()
            .set_default("feed.api_url", DEFAULT_API_URL)?
            .set_default("feed.dataset_id", DEFAULT_DATASET_ID)?
            .set_default("feed.timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("feed.accept_invalid_certs", false)?
            .set_default("storage.cache_file", DEFAULT_CACHE_FILE)?
            .set_default("storage.cache_max_age_secs", DEFAULT_CACHE_MAX_AGE_SECS)?
            .set_default("storage.database", DEFAULT_DATABASE_FILE)?
            .set_default("processing.marker_key", LOCATION_NAME_KEY)?
            .set_default("processing.max_workers", max_workers)?)
    }

    fn with_env_api_key(mut self, key: Option<String>) -> Self {
        if self.feed.api_key.as_deref().map_or(true, str::is_empty) {
            self.feed.api_key = key.filter(|k| !k.trim().is_empty());
        }
        self
    }
}

impl FeedSettings {
    /// The configured key, rejecting blanks.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ForecastError::MissingApiKey)
    }
}
