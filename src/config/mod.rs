pub mod toml_config;

use crate::adapters::http::DEFAULT_API_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;
pub const DEFAULT_MODAL_CLOSE_SECONDS: f64 = 2.5;
pub const DEFAULT_DATA_DIR: &str = "./data";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "recipe-controller")]
#[command(about = "Search, view, bookmark and upload recipes from the terminal")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub api_url: Option<String>,

    #[arg(long, env = "FORKIFY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Directory holding the bookmarks file
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Recipe id to open on startup
    #[arg(long)]
    pub recipe: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

/// Settings the application runs with, after file and flag overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub results_per_page: usize,
    pub modal_close_seconds: f64,
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            modal_close_seconds: DEFAULT_MODAL_CLOSE_SECONDS,
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

impl From<TomlConfig> for AppConfig {
    fn from(file: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            api_url: file.api.url.unwrap_or(defaults.api_url),
            api_key: file.api.key.filter(|k| !k.is_empty()),
            timeout_seconds: file.api.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            results_per_page: file.ui.results_per_page.unwrap_or(defaults.results_per_page),
            modal_close_seconds: file
                .ui
                .modal_close_seconds
                .unwrap_or(defaults.modal_close_seconds),
            data_dir: file.storage.data_dir.unwrap_or(defaults.data_dir),
        }
    }
}

impl AppConfig {
    /// Loads the config file named on the command line, if any, then applies flag overrides.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                Self::from(TomlConfig::from_file(path)?)
            }
            None => Self::default(),
        };

        if let Some(url) = &cli.api_url {
            config.api_url = url.clone();
        }
        if let Some(key) = cli.api_key.as_ref().filter(|k| !k.is_empty()) {
            config.api_key = Some(key.clone());
        }
        if let Some(data_dir) = &cli.data_dir {
            config.data_dir = data_dir.clone();
        }
        Ok(config)
    }
}

impl ConfigProvider for AppConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn results_per_page(&self) -> usize {
        self.results_per_page
    }

    /// Falls back to the default when the value is not a valid duration.
    fn modal_close_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.modal_close_seconds)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_MODAL_CLOSE_SECONDS))
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.url", &self.api_url)?;
        validation::validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_range("ui.results_per_page", self.results_per_page, 1, 100)?;
        validation::validate_range("ui.modal_close_seconds", self.modal_close_seconds, 0.0, 60.0)?;
        validation::validate_path("storage.data_dir", &self.data_dir)?;
        if let Some(key) = &self.api_key {
            validation::validate_non_empty_string("api.key", key)?;
        }
        Ok(())
    }
}
