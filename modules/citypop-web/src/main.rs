use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use citypop_common::Config;
use citypop_pipeline::DataClient;
use citypop_web::{router, spawn_refresh, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("citypop=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let state = Arc::new(AppState::new(DataClient::new(&config.api_url), config.coercion));

    // The page shows a loading indicator until this lands.
    spawn_refresh(state.clone());

    let app = router(state);

    let addr = config.web_addr();
    info!(api_url = %config.api_url, coercion = %config.coercion, "Dashboard starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
