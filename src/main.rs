//! Pokedex - An interactive PokeAPI explorer
//!
//! Runs the REPL on stdin/stdout. Logs go to stderr.

use std::io;

use tokio::io::BufReader;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Ended};
use pokedex::{Config, PokeApiClient, ResponseCache, Session};

/// Main entry point for the Pokedex.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the PokeAPI client around the cache
/// 5. Run the REPL until `exit`, end of input, Ctrl+C or SIGTERM
/// 6. Log cache statistics and close the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs do not interleave with the prompt,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, base_url={}, http_timeout={}s",
        config.cache_interval, config.base_url, config.http_timeout
    );

    let cache = ResponseCache::new(config.cache_interval());
    let client = PokeApiClient::from_config(&config, cache.clone())?;
    let mut session = Session::new(client);

    let result = repl::run_until(
        &mut session,
        BufReader::new(tokio::io::stdin()),
        &mut io::stdout(),
        shutdown_signal(),
    )
    .await;

    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        reaped = stats.reaped,
        hit_rate = stats.hit_rate(),
        "Cache statistics"
    );
    cache.close();

    if result? == Ended::Interrupted {
        // Runtime shutdown would wait on the blocking stdin read
        std::process::exit(130);
    }
    Ok(())
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed, that signal is never reported.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
