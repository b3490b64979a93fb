//! Users commands - create, edit, delete, and look up users

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use userdeck_core::{ActionOutcome, UserField, UserdeckContext};

use super::{get_context, start};
use crate::output;

#[derive(Subcommand)]
pub enum UsersCommands {
    /// List all users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a user
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
    },

    /// Change a user's name and/or email
    Edit {
        /// User ID
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Fetch a single user from the backend
    Show {
        /// User ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(base_url: Option<&str>, command: UsersCommands) -> Result<()> {
    let ctx = get_context(base_url)?;

    match command {
        UsersCommands::List { json } => list(&ctx, json).await,
        UsersCommands::Create { name, email } => create(&ctx, name, email).await,
        UsersCommands::Edit { id, name, email } => edit(&ctx, &id, name, email).await,
        UsersCommands::Delete { id, force } => delete(&ctx, &id, force).await,
        UsersCommands::Show { id, json } => show(&ctx, &id, json).await,
    }
}

async fn list(ctx: &UserdeckContext, json: bool) -> Result<()> {
    let report = start(ctx).await;
    if let Some(e) = report.users.error() {
        bail!("Failed to load users: {}", e);
    }

    let users = ctx.controller.users();
    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else if users.is_empty() {
        output::info("No users found");
    } else {
        println!("{}", output::users_table(&users));
    }
    Ok(())
}

async fn create(ctx: &UserdeckContext, name: String, email: String) -> Result<()> {
    // Creating does not need the list, but the new record lands after it
    start(ctx).await;

    ctx.controller.draft_field(UserField::Name, name);
    ctx.controller.draft_field(UserField::Email, email);
    let outcome = ctx.controller.create_user().await;
    ensure_applied("create user", &outcome)?;

    if let Some(user) = ctx.controller.users().last() {
        println!(
            "\n{} Created {} ({})\n",
            "✓".green(),
            user.name.bold(),
            user.id.dimmed()
        );
    }
    Ok(())
}

async fn edit(
    ctx: &UserdeckContext,
    id: &str,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    if name.is_none() && email.is_none() {
        bail!("Nothing to change: pass --name and/or --email");
    }

    let report = start(ctx).await;
    if let Some(e) = report.users.error() {
        bail!("Failed to load users: {}", e);
    }

    let Some(user) = ctx.controller.user(id) else {
        bail!("User '{}' not found", id);
    };

    ctx.controller.begin_edit(&user);
    for (field, value) in [(UserField::Name, name), (UserField::Email, email)] {
        if let Some(value) = value {
            ctx.controller.edit_field(field, value);
        }
    }

    let outcome = ctx.controller.submit_edit().await;
    ensure_applied("update user", &outcome)?;

    if let Some(updated) = ctx.controller.user(id) {
        println!(
            "\n{} Updated {}: {} — {}\n",
            "✓".green(),
            updated.id.dimmed(),
            updated.name,
            updated.email
        );
    }
    Ok(())
}

async fn delete(ctx: &UserdeckContext, id: &str, force: bool) -> Result<()> {
    let report = start(ctx).await;

    match ctx.controller.user(id) {
        Some(user) if !force => {
            println!(
                "\n{}",
                format!("This will delete {} ({}).", user.name, user.email).yellow()
            );
            if !Confirm::new()
                .with_prompt("Are you sure?")
                .default(false)
                .interact()?
            {
                println!("{}\n", "Cancelled".dimmed());
                return Ok(());
            }
        }
        Some(_) => {}
        None if report.users.is_applied() && !force => {
            bail!("User '{}' not found", id);
        }
        None => {
            output::warning(&format!("User '{}' is not in the loaded list", id));
        }
    }

    let outcome = ctx.controller.delete_user(id).await;
    ensure_applied("delete user", &outcome)?;

    println!("\n{} User '{}' deleted\n", "✓".green(), id);
    Ok(())
}

async fn show(ctx: &UserdeckContext, id: &str, json: bool) -> Result<()> {
    let user = ctx.controller.lookup_user(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.add_row(vec!["ID", user.id.as_str()]);
    table.add_row(vec!["Nome", user.name.as_str()]);
    table.add_row(vec!["Email", user.email.as_str()]);
    println!("{}", table);
    Ok(())
}

/// Turn a non-applied outcome into a command error
fn ensure_applied(action: &str, outcome: &ActionOutcome) -> Result<()> {
    match outcome {
        ActionOutcome::Applied => Ok(()),
        ActionOutcome::Skipped(reason) => bail!("Did not {}: {}", action, reason),
        ActionOutcome::Failed(e) => bail!("Failed to {}: {}", action, e),
    }
}
