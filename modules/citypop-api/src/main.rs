use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use citypop_api::{router, AppState};
use citypop_common::Config;
use citypop_store::{CityStore, MemoryCityStore, PgCityStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("citypop=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn CityStore> = match &config.seed_file {
        Some(path) => Arc::new(MemoryCityStore::from_json_file(path).await?),
        None => {
            let store = PgCityStore::connect_lazy(&config.database_url)?;
            // A failed connection check is logged; requests fail individually until the
            // database comes back.
            store.check_connection().await;
            Arc::new(store)
        }
    };

    let app = router(Arc::new(AppState::new(store)));

    let addr = config.api_addr();
    info!("Server is running on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
