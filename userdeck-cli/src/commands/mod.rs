//! CLI command implementations

pub mod cluster;
pub mod config;
pub mod show;
pub mod users;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use userdeck_core::config::Config;
use userdeck_core::{StartupReport, UserdeckContext};

/// Install the stderr log subscriber; `RUST_LOG` overrides the `warn` default
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Get the userdeck directory from environment or default
pub fn get_userdeck_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("USERDECK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".userdeck"))
        .context("Could not find home directory")
}

/// Resolve config, letting `--base-url` win over everything else
pub fn load_config(base_url: Option<&str>) -> Result<Config> {
    if let Some(url) = base_url {
        return Config::new(url).context("Invalid --base-url");
    }

    let userdeck_dir = get_userdeck_dir()?;
    Config::load(&userdeck_dir)
        .with_context(|| format!("Failed to load settings from {:?}", userdeck_dir))
}

/// Build a context wired to the configured backend
pub fn get_context(base_url: Option<&str>) -> Result<UserdeckContext> {
    let config = load_config(base_url)?;
    debug!(base_address = %config.base_address, "using backend");
    UserdeckContext::new(config).context("Failed to create HTTP client")
}

/// Run the startup loads behind a spinner when attached to a terminal
pub async fn start(ctx: &UserdeckContext) -> StartupReport {
    let spinner = atty::is(atty::Stream::Stdout).then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("Loading from {}", ctx.config.base_address));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let report = ctx.controller.start().await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    report
}
