//! Config command - view or change the saved backend address

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use userdeck_core::config::{Config, BASE_URL_ENV};

use super::{get_userdeck_dir, load_config};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the backend address that commands will use
    Show,

    /// Save a backend address to settings.json
    SetBaseUrl {
        /// Base URL, e.g. http://localhost:5000
        url: String,
    },
}

pub fn run(base_url: Option<&str>, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = load_config(base_url)?;
            println!("{} {}", "Base address:".bold(), config.base_address);
            if base_url.is_none() && std::env::var(BASE_URL_ENV).is_ok() {
                println!("{}", format!("(from {})", BASE_URL_ENV).dimmed());
            }
            Ok(())
        }
        ConfigCommands::SetBaseUrl { url } => {
            let config = Config::new(&url).context("Invalid base URL")?;
            let userdeck_dir = get_userdeck_dir()?;

            std::fs::create_dir_all(&userdeck_dir).with_context(|| {
                format!("Failed to create userdeck directory: {:?}", userdeck_dir)
            })?;
            config.save(&userdeck_dir).context("Failed to save settings")?;

            output::success(&format!("Base address set to {}", config.base_address));
            if std::env::var(BASE_URL_ENV).is_ok() {
                output::warning(&format!("{} is set and still takes precedence", BASE_URL_ENV));
            }
            Ok(())
        }
    }
}
