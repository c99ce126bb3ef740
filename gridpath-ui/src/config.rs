//! Configuration loading for gridpath-ui
//!
//! Single-source priority loading with flag overrides:
//! 1. --config file (must exist)
//! 2. Current working directory: ./gridpath-ui.toml
//! 3. Built-in defaults
//!
//! Command-line flags are applied on top of whichever source won.

use anyhow::{bail, Context, Result};
use navi_nexus::RouterOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::routes::is_valid_scenario_id;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "gridpath-ui.toml";

/// Log file used when navigation tracing is on but no file was configured.
pub const DEFAULT_TRACE_LOG_FILE: &str = "gridpath-ui.log";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
    /// Scenario names offered by the scenario list.
    pub scenarios: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Verbose per-navigation diagnostics. Off unless asked for.
    pub tracing: bool,
    pub max_history: usize,
    pub max_redirects: usize,
    /// Path opened at startup.
    pub start_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let router = RouterOptions::default();
        Self {
            tracing: router.tracing,
            max_history: router.max_history,
            max_redirects: router.max_redirects,
            start_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. "info" or "gridpath_ui=debug".
    pub level: String,
    /// Log destination. The terminal belongs to the UI, so without a file
    /// log output is discarded.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl UiConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse configuration")
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            tracing: self.navigation.tracing,
            max_history: self.navigation.max_history,
            max_redirects: self.navigation.max_redirects,
        }
    }

    /// Effective log file: the configured one, or a default when tracing
    /// would otherwise be written nowhere.
    pub fn log_file(&self) -> Option<PathBuf> {
        match &self.logging.file {
            Some(file) => Some(file.clone()),
            None if self.navigation.tracing => Some(PathBuf::from(DEFAULT_TRACE_LOG_FILE)),
            None => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.navigation.start_path.starts_with('/') {
            bail!(
                "navigation.start_path must be an absolute path, got '{}'",
                self.navigation.start_path
            );
        }
        if self.navigation.max_redirects == 0 {
            bail!("navigation.max_redirects must be at least 1");
        }
        if let Some(name) = self.scenarios.iter().find(|name| !is_valid_scenario_id(name)) {
            bail!("scenario name '{name}' must be non-empty and must not contain '/', '?' or '#'");
        }
        Ok(())
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: UiConfig,
    pub source: ConfigSource,
}

/// Configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Override config file path
    config_override: Option<PathBuf>,
    /// Directory searched for DEFAULT_CONFIG_FILE
    search_dir: Option<PathBuf>,
    /// Flag overrides
    tracing_override: Option<bool>,
    start_path_override: Option<String>,
    log_file_override: Option<PathBuf>,
    log_level_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Search `dir` instead of the working directory
    pub fn with_search_dir(mut self, dir: PathBuf) -> Self {
        self.search_dir = Some(dir);
        self
    }

    /// Force navigation tracing on
    pub fn with_tracing_override(mut self, enabled: bool) -> Self {
        self.tracing_override = Some(enabled);
        self
    }

    /// Set start path override
    pub fn with_start_path_override(mut self, path: String) -> Self {
        self.start_path_override = Some(path);
        self
    }

    /// Set log file override
    pub fn with_log_file_override(mut self, path: PathBuf) -> Self {
        self.log_file_override = Some(path);
        self
    }

    /// Set log level override
    pub fn with_log_level_override(mut self, level: String) -> Self {
        self.log_level_override = Some(level);
        self
    }

    /// Resolve the source, apply overrides and validate.
    pub fn load(self) -> Result<LoadedConfig> {
        let (mut config, source) = match self.find_config_file()? {
            Some(path) => (Self::read_file(&path)?, ConfigSource::File(path)),
            None => (UiConfig::default(), ConfigSource::Defaults),
        };

        if let Some(enabled) = self.tracing_override {
            config.navigation.tracing = enabled;
        }
        if let Some(path) = self.start_path_override {
            config.navigation.start_path = path;
        }
        if let Some(file) = self.log_file_override {
            config.logging.file = Some(file);
        }
        if let Some(level) = self.log_level_override {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(LoadedConfig { config, source })
    }

    fn find_config_file(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.config_override {
            if !path.is_file() {
                bail!("Configuration file not found: {}", path.display());
            }
            return Ok(Some(path.clone()));
        }

        let dir = match &self.search_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to read working directory")?,
        };
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Ok(candidate.is_file().then_some(candidate))
    }

    fn read_file(path: &Path) -> Result<UiConfig> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        UiConfig::from_toml(&source).with_context(|| format!("Invalid config file: {}", path.display()))
    }
}
