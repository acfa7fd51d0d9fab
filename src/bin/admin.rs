//! CLI administration tool for link-keeper.
//!
//! Runs the same services as the HTTP server directly against the database,
//! without going through `POST /config`.
//!
//! # Usage
//!
//! ```bash
//! # Check connectivity and schema state
//! cargo run --bin admin -- db check
//!
//! # Create the link table and id function
//! cargo run --bin admin -- db init
//!
//! # Manage links
//! cargo run --bin admin -- links list
//! cargo run --bin admin -- links add https://example.com --new-window
//! cargo run --bin admin -- links delete 4f1d2c3b4a5e4f60817283940a1b2c3d
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/
//! `DB_PASS`/`DB_NAME`, plus `LINK_TABLE` and `ID_FUNCTION`.

use link_keeper::application::services::{InitOutcome, LinkService, SchemaService, SetupStatus};
use link_keeper::config::load_from_env;
use link_keeper::domain::entities::LinkInput;
use link_keeper::infrastructure::database::DatabaseContext;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde_json::Value;

/// CLI tool for managing link-keeper.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and schema state
    Check,

    /// Create the link table and id function if missing
    Init,
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links
    List,

    /// Create a link
    Add {
        /// Target URL (at most 512 characters)
        url: String,

        /// Open the target in a new window
        #[arg(short, long)]
        new_window: bool,
    },

    /// Delete a link
    Delete {
        /// Link id
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env().context("Invalid configuration")?;
    let database = DatabaseContext::from_config(&config)?;

    let schema_service = SchemaService::new(database.schema_repository.clone());
    let link_service = LinkService::new(database.link_repository.clone());

    let result = match cli.command {
        Commands::Db { action } => handle_db_action(action, &schema_service).await,
        Commands::Links { action } => handle_link_action(action, &link_service).await,
    };

    database.connection.disconnect().await;
    result
}

/// Handles database diagnostic and bootstrap commands.
async fn handle_db_action(action: DbAction, schema_service: &SchemaService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            match schema_service.status().await {
                SetupStatus::DatabaseUnavailable => {
                    println!("{}", "Database unavailable".red().bold());
                    anyhow::bail!("Database connection failed");
                }
                SetupStatus::NeedsInit => {
                    println!("{}", "Database connection OK".green().bold());
                    println!(
                        "{}",
                        "Schema incomplete: run `admin db init`".yellow()
                    );
                }
                SetupStatus::Ready => {
                    println!("{}", "Database connection OK".green().bold());
                    println!("{}", "Schema provisioned".green());
                }
            }
        }
        DbAction::Init => {
            println!("{}", "Provisioning schema...".bright_blue());

            let outcome = schema_service
                .initialize()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to provision schema: {}", e))?;

            match outcome {
                InitOutcome::AlreadyProvisioned => {
                    println!("{}", "Schema already provisioned, nothing to do".yellow());
                }
                InitOutcome::Provisioned => {
                    println!("{}", "Schema provisioned successfully!".green().bold());
                }
            }
        }
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, link_service: &LinkService) -> Result<()> {
    match action {
        LinkAction::List => list_links(link_service).await,
        LinkAction::Add { url, new_window } => add_link(link_service, url, new_window).await,
        LinkAction::Delete { id, yes } => delete_link(link_service, id, yes).await,
    }
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// Short links
///
///   ID                                NEW  URL
///   ──────────────────────────────────────────────────────────────
///   4f1d2c3b4a5e4f60817283940a1b2c3d  no   https://example.com
/// ```
async fn list_links(link_service: &LinkService) -> Result<()> {
    println!("{}", "Short links".bright_blue().bold());
    println!();

    let links = link_service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links add <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<32}  {:<3}  {}",
        "ID".bright_white().bold(),
        "NEW".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let new_window = if link.new_window {
            "yes".green()
        } else {
            "no".bright_black()
        };

        println!("  {:<32}  {:<3}  {}", link.id.cyan(), new_window, link.url);
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates a link. The id is generated by the database.
async fn add_link(link_service: &LinkService, url: String, new_window: bool) -> Result<()> {
    link_service
        .create_link(LinkInput::new(url.clone(), Value::Bool(new_window)))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    let new_window = if new_window { "yes" } else { "no" };

    println!("{}", "Link created successfully!".green().bold());
    println!("  URL:        {}", url.cyan());
    println!("  New window: {}", new_window.bright_white());
    println!();
    println!(
        "  Run {} admin links list to see its id",
        "cargo run --bin".bright_cyan()
    );

    Ok(())
}

/// Deletes a link after showing it and asking for confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Fails if the id does not exist
async fn delete_link(link_service: &LinkService, id: String, skip_confirm: bool) -> Result<()> {
    let link = link_service
        .resolve(&id)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot delete '{}': {}", id, e))?;

    println!("  ID:  {}", link.id.cyan());
    println!("  URL: {}", link.url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    link_service
        .delete_link(&link.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "Link deleted successfully!".green().bold());

    Ok(())
}

