//! lexicache driver - a headless client for the neologism dictionary.
//!
//! Restores a persisted session (or signs in from env credentials), mirrors
//! the remote dictionary into the entity cache, and prints the derived
//! views. An optional command-line argument runs a search over the mirror.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lexicache::api::ApiClient;
use lexicache::auth::{AuthWatch, Session};
use lexicache::cache::NeologismCache;
use lexicache::config::Config;
use lexicache::notify::TracingNotifier;
use lexicache::utils::truncate;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let service_url = config.service_url()?;
    let anon_key = config.anon_key()?;
    let mut client = ApiClient::new(&service_url, &anon_key)?;

    let cache_dir = config
        .cache_dir()
        .unwrap_or_else(|_| PathBuf::from("./cache"));
    let mut session = Session::new(cache_dir);
    let restored = session.load().unwrap_or(false);
    debug!(restored, "Session load attempted");

    let restored_token = session.token().map(str::to_string);
    if let Some(token) = restored_token {
        client.set_token(token);
    } else if let (Ok(email), Ok(password)) = (
        std::env::var("LEXICACHE_EMAIL"),
        std::env::var("LEXICACHE_PASSWORD"),
    ) {
        match client.sign_in(&email, &password).await {
            Ok(data) => {
                info!(email = %data.email, "Signed in");
                client.set_token(data.access_token.clone());
                session.update(data);
                session.save().context("Failed to persist session")?;
            }
            Err(e) => {
                warn!(error = %e, "Sign-in failed, continuing anonymously");
            }
        }
    }

    let auth = AuthWatch::new(session.is_valid());
    let cache = Arc::new(NeologismCache::new(
        Arc::new(client),
        Arc::new(TracingNotifier),
        auth.subscribe(),
    ));
    let _auth_listener = Arc::clone(&cache).spawn_auth_refresh();

    cache.refresh_data().await;

    let snapshot = cache.snapshot();
    println!(
        "{} neologisms, {} categories ({})",
        snapshot.neologisms.len(),
        snapshot.categories.len(),
        if cache.is_authenticated() {
            "authenticated"
        } else {
            "anonymous"
        }
    );

    if let Some(latest) = cache.latest_neologism() {
        println!(
            "Latest: {} - {}",
            latest.name,
            truncate(&latest.definition, 60)
        );
    }
    if let Some(featured) = cache.random_neologism() {
        println!(
            "Word of the moment: {} - {}",
            featured.name,
            truncate(&featured.definition, 60)
        );
    }

    if let Some(query) = std::env::args().nth(1) {
        let matches = cache.search(&query);
        println!("{} match(es) for \"{}\":", matches.len(), query);
        for n in &matches {
            println!(
                "  {} [{}] {}",
                n.name,
                n.status,
                truncate(&n.definition, 60)
            );
        }
    }

    Ok(())
}
