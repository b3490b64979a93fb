//! Userdeck CLI - manage users and inspect the cluster from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{cluster, config, show, users};

/// Userdeck - user management and cluster overview
#[derive(Parser)]
#[command(name = "userdeck", version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides settings.json and USERDECK_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load users and cluster topology and print the page
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create, edit, delete, or look up users
    Users {
        #[command(subcommand)]
        command: users::UsersCommands,
    },

    /// Show cluster topology
    Cluster {
        /// Refresh every SECS seconds until interrupted
        #[arg(long, value_name = "SECS")]
        watch: Option<u64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View or change the saved backend address
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    commands::init_tracing();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Show { json } => show::run(base_url, json).await,
        Commands::Users { command } => users::run(base_url, command).await,
        Commands::Cluster { watch, json } => cluster::run(base_url, watch, json).await,
        Commands::Config { command } => config::run(base_url, command),
    }
}
