//! Cluster command - print (and optionally poll) the cluster topology

use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use anyhow::{bail, Result};
use colored::Colorize;
use tokio::time::MissedTickBehavior;
use tracing::warn;
use userdeck_core::services::render::{node_count_line, TOPOLOGY_LOADING, TOPOLOGY_TITLE};
use userdeck_core::UserdeckContext;

use super::get_context;
use crate::output;

pub async fn run(base_url: Option<&str>, watch: Option<u64>, json: bool) -> Result<()> {
    let ctx = get_context(base_url)?;

    let Some(secs) = watch else {
        let outcome = ctx.controller.refresh_topology().await;
        print_topology(&ctx, json)?;
        if let Some(e) = outcome.error() {
            bail!("Failed to load cluster topology: {}", e);
        }
        return Ok(());
    };

    if secs == 0 {
        bail!("--watch needs an interval of at least 1 second");
    }

    let ctx = &ctx;
    let refreshes = Cell::new(0u64);
    let refreshes = &refreshes;

    watch_until(Duration::from_secs(secs), ctrl_c(), move || async move {
        refreshes.set(refreshes.get() + 1);
        let outcome = ctx.controller.refresh_topology().await;
        if !json {
            println!(
                "{}",
                format!(
                    "refresh #{} every {}s: {}",
                    refreshes.get(),
                    secs,
                    output::outcome_label(&outcome)
                )
                .dimmed()
            );
        }
        // Failed refreshes keep showing the last good snapshot
        print_topology(ctx, json)
    })
    .await?;

    output::info("Stopped watching");
    Ok(())
}

/// Resolves on the first Ctrl+C; never resolves if the handler can't be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Run `tick` every `period` until `shutdown` resolves
///
/// `shutdown` is raced against the wait and against the tick itself, so a
/// tick stuck on the network is abandoned. Ticks missed while one was
/// running are not replayed.
async fn watch_until<S, F, Fut>(period: Duration, shutdown: S, mut tick: F) -> Result<()>
where
    S: Future<Output = ()>,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    tokio::pin!(shutdown);

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            _ = interval.tick() => {}
        }
        tokio::select! {
            _ = &mut shutdown => return Ok(()),
            result = tick() => result?,
        }
    }
}

fn print_topology(ctx: &UserdeckContext, json: bool) -> Result<()> {
    let topology = ctx.controller.topology();

    if json {
        println!("{}", serde_json::to_string(&topology)?);
        return Ok(());
    }

    println!("{}", TOPOLOGY_TITLE.bold());
    match topology {
        Some(snapshot) => {
            println!("{}", node_count_line(&snapshot));
            if !snapshot.nodes.is_empty() {
                println!("{}", output::nodes_table(&snapshot));
            }
        }
        None => println!("{}", TOPOLOGY_LOADING.dimmed()),
    }
    println!();
    Ok(())
}
