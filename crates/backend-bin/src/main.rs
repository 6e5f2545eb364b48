//! Process bootstrap for the filedock auth backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use filedock_backend_lib::{
    config::Settings,
    router::create_router,
    store::{CredentialStore, PgCredentialBackend, RedisTokenBackend, TokenStore},
    AppState,
};

#[derive(Parser)]
#[command(name = "filedock-server", about = "filedock auth backend")]
struct Args {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    // Initialize logging; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    // The two store handles are established once and shared process-wide
    let pg = PgCredentialBackend::connect(&settings.database_url).await?;
    pg.bootstrap_schema().await?;
    let redis = RedisTokenBackend::connect(&settings.redis_url).await?;

    let store_timeout = Duration::from_secs(settings.store_timeout_secs);
    let credentials = CredentialStore::new(Arc::new(pg), store_timeout);
    let tokens = TokenStore::new(Arc::new(redis), store_timeout);

    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(credentials, tokens, settings));
    let app = create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
