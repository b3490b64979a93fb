//! Show command - load everything and print the page

use anyhow::{bail, Result};
use colored::Colorize;
use userdeck_core::services::render::{node_count_line, NO_USERS, TOPOLOGY_LOADING, TOPOLOGY_TITLE, USERS_TITLE};

use super::{get_context, start};
use crate::output;

pub async fn run(base_url: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context(base_url)?;
    let report = start(&ctx).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&ctx.controller.view())?);
    } else {
        println!("{}", TOPOLOGY_TITLE.bold());
        match ctx.controller.topology() {
            Some(snapshot) => {
                println!("{}", node_count_line(&snapshot));
                if !snapshot.nodes.is_empty() {
                    println!("{}", output::nodes_table(&snapshot));
                }
            }
            None => println!("{}", TOPOLOGY_LOADING.dimmed()),
        }
        println!();

        println!("{}", USERS_TITLE.bold());
        let users = ctx.controller.users();
        if users.is_empty() {
            println!("{}", NO_USERS.dimmed());
        } else {
            println!("{}", output::users_table(&users));
        }
    }

    // Partial pages are still printed; the failure shows in the exit code
    let failures: Vec<String> = [("users", &report.users), ("topology", &report.topology)]
        .into_iter()
        .filter_map(|(what, outcome)| outcome.error().map(|e| format!("{}: {}", what, e)))
        .collect();

    if !failures.is_empty() {
        bail!("Failed to load {}", failures.join("; "));
    }
    Ok(())
}
