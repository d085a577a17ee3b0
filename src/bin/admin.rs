//! CLI administration tool for url-shortener.
//!
//! Manages saved URLs and inspects the database directly, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Save a URL under a generated alias
//! cargo run --bin admin -- url add https://example.com
//!
//! # Save a URL under a custom alias
//! cargo run --bin admin -- url add https://example.com --alias mysite
//!
//! # Show where an alias points
//! cargo run --bin admin -- url get mysite
//!
//! # Delete an alias
//! cargo run --bin admin -- url delete mysite
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `STORAGE_PATH`: SQLite database (default: `./storage/storage.db`)
//! - `ALIAS_LENGTH`, `ALIAS_MAX_ATTEMPTS`: allocation settings, as for the server

use url_shortener::application::services::UrlService;
use url_shortener::config::allocation_policy_from_env;
use url_shortener::domain::error::UrlError;
use url_shortener::infrastructure::persistence::{
    SqliteUrlRepository, StorageConfig, connect, migrate,
};
use url_shortener::utils::alias_generator::RandomAliasGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

type AdminUrlService = UrlService<SqliteUrlRepository, RandomAliasGenerator>;

/// CLI tool for managing url-shortener.
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
    /// Manage saved URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// URL management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Save a URL
    Add {
        /// Target URL
        url: String,

        /// Custom alias (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the URL stored under an alias
    Get {
        /// Alias to look up
        alias: String,
    },

    /// Delete an alias
    Delete {
        /// Alias to delete
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let storage = StorageConfig::from_env();
    storage.validate()?;
    let policy = allocation_policy_from_env()?;

    let pool = connect(&storage)
        .await
        .context("Failed to connect to database")?;
    migrate(&pool)
        .await
        .context("Failed to run database migrations")?;

    let repository = Arc::new(SqliteUrlRepository::with_timeout(
        Arc::new(pool),
        storage.op_timeout(),
    ));
    let service = UrlService::new(
        repository,
        Arc::new(RandomAliasGenerator),
        policy,
    );

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

/// Dispatches URL management commands.
async fn handle_url_action(action: UrlAction, service: &AdminUrlService) -> Result<()> {
    match action {
        UrlAction::Add { url, alias } => add_url(service, url, alias).await,
        UrlAction::Get { alias } => get_url(service, alias).await,
        UrlAction::Delete { alias, yes } => delete_url(service, alias, yes).await,
    }
}

async fn add_url(service: &AdminUrlService, url: String, alias: Option<String>) -> Result<()> {
    println!("{}", "🔗 Save URL".bright_blue().bold());
    println!();

    match service.save_url(&url, alias.as_deref()).await {
        Ok(saved) => {
            println!("  URL:   {}", url.cyan());
            println!("  Alias: {}", saved.alias.bright_yellow().bold());
            println!("  ID:    {}", saved.id.to_string().bright_black());
            println!();
            println!("{}", "✅ URL saved successfully!".green().bold());
            Ok(())
        }
        Err(UrlError::AliasConflict) => {
            anyhow::bail!("Alias '{}' is already taken", alias.unwrap_or_default())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to save url: {}", e)),
    }
}

async fn get_url(service: &AdminUrlService, alias: String) -> Result<()> {
    match service.resolve(&alias).await {
        Ok(target) => {
            println!("  {} → {}", alias.bright_yellow(), target.cyan());
            Ok(())
        }
        Err(UrlError::NotFound) => anyhow::bail!("Alias '{}' not found", alias),
        Err(e) => Err(anyhow::anyhow!("Failed to get url: {}", e)),
    }
}

/// Deletes an alias after showing its target.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
async fn delete_url(service: &AdminUrlService, alias: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete URL".bright_blue().bold());
    println!();

    let target = match service.resolve(&alias).await {
        Ok(target) => target,
        Err(UrlError::NotFound) => {
            println!("{}", "⚠️  Alias not found".yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    println!("  Alias: {}", alias.bright_yellow());
    println!("  URL:   {}", target.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this alias?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match service.delete_url(&alias).await {
        Ok(()) => println!("{}", "✅ Alias deleted".green().bold()),
        Err(UrlError::NotFound) => println!("{}", "⚠️  Alias was already deleted".yellow()),
        Err(e) => return Err(anyhow::anyhow!("Failed to delete url: {}", e)),
    }
    println!();

    Ok(())
}

/// Displays the number of stored URLs.
async fn handle_stats(service: &AdminUrlService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count urls: {}", e))?;

    println!("  URLs: {}", count.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, service: &AdminUrlService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            service
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
