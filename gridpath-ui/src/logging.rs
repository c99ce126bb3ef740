//! Tracing subscriber setup.
//!
//! The terminal is owned by the UI, so events go to a log file. Without a
//! file they are discarded.

use anyhow::{anyhow, Context, Result};
use navi_nexus::NAVIGATION_TARGET;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::UiConfig;

/// Environment variable that replaces the configured filter entirely.
pub const LOG_ENV: &str = "GRIDPATH_UI_LOG";

/// Filter used when `LOG_ENV` is unset.
pub fn default_filter(config: &UiConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(&config.logging.level)
        .with_context(|| format!("Invalid log level: {}", config.logging.level))?;
    if config.navigation.tracing {
        let directive = format!("{NAVIGATION_TARGET}=debug");
        filter = filter.add_directive(directive.parse().context("Invalid navigation directive")?);
    }
    Ok(filter)
}

pub fn init(config: &UiConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => default_filter(config)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false);

    let installed = match config.log_file() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.with_writer(Arc::new(file)).try_init()
        }
        None => builder.with_writer(std::io::sink).try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
