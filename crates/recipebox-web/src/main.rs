//! recipebox-web - recipe pages in front of the recipe API.

use tracing::info;
use tracing_subscriber::EnvFilter;

use recipebox_web::{router, ApiClient, WebConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WebConfig::from_env()?;
    let api = ApiClient::new(&config.api_base_url)?;
    info!("Using recipe API at {}", api.base_url());

    let app = router(api);

    let addr = config.addr();
    info!("Starting Recipebox pages on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
