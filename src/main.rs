//! Redis Basic - key-value store exercises
//!
//! Runs the storage, replay and web cache exercises against the configured
//! store.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_basic::config::{BackendKind, Config, ReplayFormat};
use redis_basic::{
    spawn_cleanup_task, Cache, HttpFetcher, KeyValueBackend, MemoryBackend, RedisBackend,
    WebCache,
};

/// Main entry point for the exercises.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the store backend (and its cleanup task for the memory backend)
/// 4. Run the typed storage and replay exercise
/// 5. Run the expiring web cache exercise
/// 6. Stop the cleanup task and drop the store handle
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_basic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={}, redis_url={}, page_ttl={}s, demo_url={}",
        config.backend, config.redis_url, config.page_ttl, config.demo_url
    );

    let mut cleanup_handle = None;
    let backend: Arc<dyn KeyValueBackend> = match config.backend {
        BackendKind::Redis => Arc::new(
            RedisBackend::connect(&config.redis_url)
                .await
                .with_context(|| format!("failed to connect to {}", config.redis_url))?,
        ),
        BackendKind::Memory => {
            let memory = Arc::new(MemoryBackend::new());
            cleanup_handle = Some(spawn_cleanup_task(memory.clone(), config.cleanup_interval));
            memory
        }
    };

    let result = run(&config, backend).await;

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
    info!("Store closed");

    result
}

async fn run(config: &Config, backend: Arc<dyn KeyValueBackend>) -> anyhow::Result<()> {
    // == Typed storage ==
    let cache = Cache::open(backend.clone()).await?;

    let text_key = cache.store("foo").await?;
    let bytes_key = cache.store(b"bar").await?;
    let int_key = cache.store(123).await?;
    let float_key = cache.store(3.14).await?;

    println!("{} -> {:?}", text_key, cache.get_str(&text_key).await?);
    println!("{} -> {:?}", bytes_key, cache.get(&bytes_key).await?);
    println!("{} -> {:?}", int_key, cache.get_int(&int_key).await?);
    println!("{} -> {:?}", float_key, cache.get_float(&float_key).await?);
    println!("missing -> {:?}", cache.get_str("missing").await?);

    // == Replay ==
    match config.replay_format {
        ReplayFormat::Text => {
            cache.replay().await?;
        }
        ReplayFormat::Json => {
            let report = redis_basic::instrument::ReplayReport::load(
                backend.as_ref(),
                redis_basic::cache::STORE_OPERATION,
            )
            .await?;
            println!("{}", report.to_json()?);
        }
    }

    // == Expiring web cache ==
    let web = WebCache::with_ttl(
        backend,
        HttpFetcher::new(),
        Duration::from_secs(config.page_ttl),
    );

    for _ in 0..2 {
        match web.get_page(&config.demo_url).await {
            Ok(body) => println!("{}: {} bytes", config.demo_url, body.len()),
            Err(err) => warn!(url = %config.demo_url, error = %err, "Page fetch failed"),
        }
    }
    println!(
        "{} accessed {} times",
        config.demo_url,
        web.access_count(&config.demo_url).await?
    );

    Ok(())
}
