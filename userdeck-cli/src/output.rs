//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use userdeck_core::{ActionOutcome, ClusterTopologySnapshot, User};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn users_table(users: &[User]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Nome", "Email"]);
    for user in users {
        table.add_row(vec![user.id.as_str(), user.name.as_str(), user.email.as_str()]);
    }
    table
}

pub fn nodes_table(snapshot: &ClusterTopologySnapshot) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Endereço", "Data Center", "Rack"]);
    for node in &snapshot.nodes {
        table.add_row(vec![
            node.address.as_str(),
            node.datacenter.as_str(),
            node.rack.as_str(),
        ]);
    }
    table
}

/// Short status word for an outcome, colored by kind
pub fn outcome_label(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Applied => "ok".green().to_string(),
        ActionOutcome::Skipped(_) => "skipped".yellow().to_string(),
        ActionOutcome::Failed(_) => "failed".red().to_string(),
    }
}
