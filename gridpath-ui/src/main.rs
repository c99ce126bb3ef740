//! # gridpath-ui
//!
//! Terminal navigation shell for GridPath scenarios.
//!
//! ## Usage
//!
//! - `gridpath-ui` - open the scenario list
//! - `gridpath-ui --start-path /scenario/base` - open a scenario directly
//! - `gridpath-ui --trace-navigation` - log every navigation step
//!
//! Paths: `/scenarios`, `/scenario/{id}`, `/scenario-new`, `/settings`;
//! `/` redirects to `/scenarios`.

use anyhow::{Context, Result};
use clap::Parser;
use navi_nexus::{register_routes, Application};
use std::path::PathBuf;

mod address_bar;
mod app;
mod config;
mod logging;
mod pages;
mod routes;

use crate::app::Root;
use crate::config::ConfigLoader;

/// gridpath-ui - browse GridPath scenarios from the terminal
#[derive(Parser)]
#[command(name = "gridpath-ui")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal navigation shell for GridPath scenarios")]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit verbose diagnostics for every navigation
    #[arg(long, env = "GRIDPATH_UI_TRACE_NAVIGATION")]
    trace_navigation: bool,

    /// Path to open at startup
    #[arg(long)]
    start_path: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if cli.trace_navigation {
        loader = loader.with_tracing_override(true);
    }

    if let Some(start_path) = &cli.start_path {
        loader = loader.with_start_path_override(start_path.clone());
    }

    if let Some(log_file) = &cli.log_file {
        loader = loader.with_log_file_override(log_file.clone());
    }

    if cli.verbose {
        loader = loader.with_log_level_override("debug".to_string());
    }

    loader
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = build_config_loader(&cli).load()?;
    logging::init(&loaded.config)?;

    tracing::info!(
        source = %loaded.source,
        tracing = loaded.config.navigation.tracing,
        start_path = %loaded.config.navigation.start_path,
        "Configuration loaded"
    );

    let table = routes::route_table().context("Invalid route table")?;
    let router = register_routes(table, loaded.config.router_options());
    let root = Root::new(router, &loaded)?;

    let app = Application::new();
    app.run(move |cx| {
        cx.set_root(root)?;
        Ok(())
    })
}
