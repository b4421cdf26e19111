//! recipebox-server - JSON API for recipe records.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipebox_store::{load_seed, MemoryStore};

#[derive(Parser)]
#[command(name = "recipebox-server", about = "Recipebox recipe API")]
#[command(version)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "RECIPEBOX_BIND")]
    bind_host: String,

    /// HTTP port for the API
    #[arg(long, default_value = "8000", env = "RECIPEBOX_PORT")]
    port: u16,

    /// JSON file with recipes to load at start-up
    #[arg(long, env = "RECIPEBOX_SEED")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = match &cli.seed {
        Some(path) => MemoryStore::with_recipes(load_seed(path)?),
        None => {
            info!("No seed file given. Starting with an empty store.");
            MemoryStore::new()
        }
    };

    let app = recipebox_server::router(Arc::new(store));

    let addr = format!("{}:{}", cli.bind_host, cli.port);
    info!("Starting Recipebox API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
