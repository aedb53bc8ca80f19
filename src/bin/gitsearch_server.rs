use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gitsearch::config::AppConfig;
use gitsearch::search::cache::{InMemoryCache, SearchCache};
use gitsearch::search::providers::github::GithubClient;
use gitsearch::services::ReposService;
use gitsearch::transport::http_server::{self, AppContext};

#[derive(Parser)]
#[command(author, version = "0.1.0", about = "Web service for searching popular repositories on GitHub", long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to (overrides HOST/PORT environment variables)
    #[arg(short, long)]
    address: Option<String>,

    /// GitHub API token for authentication (overrides GITHUB_API_TOKEN environment variable)
    #[arg(short = 't', long)]
    github_token: Option<String>,

    /// Enable in-process caching of result pages (overrides CACHE_ENABLE environment variable)
    #[arg(long)]
    cache: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;

    if let Some(token) = cli.github_token {
        config.github_token = Some(token);
    }
    if cli.cache {
        config.cache_enabled = true;
    }

    let level = if cli.debug {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = match cli.address {
        Some(address) => address.parse()?,
        None => SocketAddr::new(config.host.parse()?, config.port),
    };

    if config.github_token.is_some() {
        tracing::info!("using GitHub API token for authenticated requests");
    } else {
        tracing::info!("no GitHub API token configured, unauthenticated rate limits apply");
    }

    let provider = Arc::new(GithubClient::new(
        reqwest::Client::new(),
        config.github_token.clone(),
    ));

    let cache: Option<Arc<dyn SearchCache>> = if config.cache_enabled {
        tracing::info!("result-page caching enabled");
        Some(Arc::new(InMemoryCache::new()))
    } else {
        None
    };

    let ctx = AppContext {
        repos_service: ReposService::new(provider, cache),
    };

    http_server::serve(addr, ctx).await
}
