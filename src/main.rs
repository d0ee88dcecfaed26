//! shellcache host binary.
//!
//! Plays the part of the hosting application: registers the offline
//! worker for the configured origin and fetches the given URLs through
//! it. `--list` prints the current store's entries with their ages.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shellcache::{CacheStore, Config, HttpBackend, Registration, Request};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Set up logging with environment-based filter
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("shellcache starting");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--list") {
        return list_entries(&config);
    }
    if args.is_empty() {
        eprintln!("Usage: shellcache [--list] [URL or /path ...]");
        return Ok(());
    }

    let backend = Arc::new(HttpBackend::new()?);
    let registration = Registration::register(&config, backend).await?;

    for arg in &args {
        let url = config.resolve(arg);
        match registration.fetch(&Request::get(&url)).await? {
            Some(response) => {
                println!("{:>4}  {}  ({} bytes)", response.status, url, response.body.len());
            }
            None => println!("  --  {}  (no response)", url),
        }
    }

    Ok(())
}

/// Print the current store's entries with their ages.
fn list_entries(config: &Config) -> Result<()> {
    let root = config.cache_root()?;
    let store = CacheStore::open(&root, &config.store_name())?;

    let entries = store.entries()?;
    if entries.is_empty() {
        println!("{}: empty", store.name());
        return Ok(());
    }

    println!("{}:", store.name());
    for entry in entries {
        println!(
            "{:>6}  {:<10}  {:>8} bytes  {}",
            entry.status,
            entry.age_display(),
            entry.body_bytes,
            entry.url
        );
    }
    Ok(())
}
