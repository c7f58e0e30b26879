//! Herodex server - read-through gateway for a remote character catalog.
//!
//! Wires the upstream client, the snapshot cache and the catalog service
//! together, optionally warms the cache with a full sync, and serves the
//! HTTP API.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use herodex_catalog::{CatalogService, InMemoryCache};
use herodex_server::build_router;
use herodex_upstream::{ApiClient, UpstreamConfig};

#[derive(Parser, Debug)]
#[command(name = "herodex-server")]
#[command(about = "Read-through gateway for a remote character catalog")]
#[command(version)]
struct Args {
    /// Base URL of the upstream catalog API, without a trailing slash.
    #[arg(long, env = "HERODEX_UPSTREAM_BASE_URL")]
    upstream_base_url: String,

    /// Public half of the upstream API key pair.
    #[arg(long, env = "HERODEX_API_KEY_PUBLIC")]
    api_key_public: String,

    /// Private half of the upstream API key pair.
    #[arg(long, env = "HERODEX_API_KEY_PRIVATE", hide_env_values = true)]
    api_key_private: String,

    /// Address to serve the HTTP API on.
    #[arg(long, env = "HERODEX_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    listen_addr: String,

    /// Warm the cache with a full sync before serving.
    #[arg(long, env = "HERODEX_EAGER_LOAD_CACHE")]
    eager_load_cache: bool,

    /// Maximum concurrent trailing-page requests per batch fetch.
    #[arg(long, env = "HERODEX_PAGE_CONCURRENCY", default_value = "8")]
    page_concurrency: usize,

    /// Per-call upstream timeout in seconds.
    #[arg(long, env = "HERODEX_UPSTREAM_TIMEOUT_SECS", default_value = "15")]
    upstream_timeout_secs: u64,

    /// Enable verbose debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("herodex server starting");

    let client = Arc::new(ApiClient::new(UpstreamConfig {
        base_url: args.upstream_base_url,
        public_key: args.api_key_public,
        private_key: args.api_key_private,
        max_concurrent_pages: args.page_concurrency,
        timeout: Duration::from_secs(args.upstream_timeout_secs),
        ..Default::default()
    }));
    let cache = Arc::new(InMemoryCache::new());
    let service = Arc::new(CatalogService::new(client, cache));

    if args.eager_load_cache {
        info!("prepopulating cache");
        service
            .rebuild_cache()
            .await
            .context("failed to populate cache")?;
    }

    let app = build_router(service);
    let listener = tokio::net::TcpListener::bind(&args.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", args.listen_addr))?;

    info!("listening on {}", args.listen_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
