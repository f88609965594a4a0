//! CLI administration tool for redis-shortener.
//!
//! Inspects quota counters and short links directly in the store, without
//! going through the HTTP API. Nothing here writes to the store.
//!
//! # Usage
//!
//! ```bash
//! # Show a client's remaining quota
//! cargo run --bin admin -- quota 203.0.113.7
//!
//! # Show where a short code points
//! cargo run --bin admin -- link abc123
//!
//! # Check both store namespaces
//! cargo run --bin admin -- ping
//! ```
//!
//! # Environment Variables
//!
//! Reads the same configuration as the server (`REDIS_URL`, `API_QUOTA`, ...).

use redis_shortener::application::services::{LinkAllocator, QuotaTracker};
use redis_shortener::config::{self, Config};
use redis_shortener::server::connect_stores;
use redis_shortener::utils::url_normalizer::short_url;

use anyhow::Result;
use chrono::{Local, TimeDelta};
use clap::{Parser, Subcommand};
use colored::*;
use std::time::Duration;

/// CLI tool for inspecting redis-shortener state.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show remaining quota and reset time for a client
    Quota {
        /// Client identity (usually an IP address)
        client: String,
    },

    /// Show the destination and remaining lifetime of a short code
    Link {
        /// Short code
        code: String,
    },

    /// Check connectivity of both store namespaces
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let (quota_store, link_store) = connect_stores(&config).await?;
    let quota = QuotaTracker::new(quota_store, config.api_quota, config.quota_window());
    let links = LinkAllocator::new(
        link_store,
        config.short_code_length,
        config.default_expiry_hours,
    );

    match cli.command {
        Commands::Quota { client } => show_quota(&quota, &client).await?,
        Commands::Link { code } => show_link(&links, &config, &code).await?,
        Commands::Ping => ping(&quota, &links).await,
    }

    Ok(())
}

async fn show_quota(quota: &QuotaTracker, client: &str) -> Result<()> {
    let status = quota.status(client).await?;

    println!("{}", "📊 Quota".bright_blue().bold());
    println!();
    println!("  Client:    {}", client.cyan());

    let remaining = format!("{} / {}", status.remaining, quota.limit());
    if status.remaining > 0 {
        println!("  Remaining: {}", remaining.green().bold());
    } else {
        println!("  Remaining: {}", remaining.red().bold());
    }

    println!(
        "  Resets in: {} min (at {})",
        status.reset_minutes().to_string().bright_yellow(),
        local_time_after(status.reset_after)
    );
    println!();

    Ok(())
}

async fn show_link(links: &LinkAllocator, config: &Config, code: &str) -> Result<()> {
    println!("{}", "🔗 Short Link".bright_blue().bold());
    println!();

    let Some(url) = links.resolve(code).await? else {
        println!("{}", format!("  ❌ '{}' not found or expired", code).red());
        println!();
        return Ok(());
    };

    println!("  Code:        {}", code.cyan());
    println!("  Destination: {}", url.bright_white());
    println!("  Short URL:   {}", short_url(&config.service_domain, code));

    match links.remaining_hours(code).await? {
        Some(hours) => println!(
            "  Expires in:  {} h",
            hours.to_string().bright_yellow()
        ),
        None => println!("  Expires in:  {}", "never".yellow()),
    }
    println!();

    Ok(())
}

async fn ping(quota: &QuotaTracker, links: &LinkAllocator) {
    println!("{}", "🔍 Store Check".bright_blue().bold());
    println!();

    for (name, up) in [
        ("links", links.health_check().await),
        ("quota", quota.health_check().await),
    ] {
        if up {
            println!("  {} {}", "✅".green(), name);
        } else {
            println!("  {} {} {}", "❌".red(), name, "unreachable".red());
        }
    }
    println!();
}

fn local_time_after(after: Duration) -> String {
    let delta = TimeDelta::from_std(after).unwrap_or(TimeDelta::zero());
    (Local::now() + delta).format("%H:%M:%S").to_string()
}
