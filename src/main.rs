//! Invoice dashboard server
//!
//! Configuration comes from the YAML file named by `DASHBOARD_CONFIG`
//! (default `dashboard.yaml`); log filtering from `RUST_LOG`.

use anyhow::Result;
use dashboard::config::{DashboardConfig, StorageBackend};
use dashboard::server::DashboardBuilder;
use dashboard::storage::{InMemoryStore, seed_demo_data};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "info,invoice_dashboard=debug,dashboard=debug";

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact().with_target(false))
        .init();

    let config = DashboardConfig::load()?;
    tracing::info!(
        bind = %config.server.bind,
        backend = ?config.storage.backend,
        seed = config.storage.seed,
        items_per_page = config.listing.items_per_page,
        "starting invoice dashboard"
    );

    let builder = match config.storage.backend {
        StorageBackend::InMemory => {
            let store = InMemoryStore::new();
            if config.storage.seed {
                seed_demo_data(&store, &store).await?;
            }
            DashboardBuilder::new().with_store(store)
        }
        StorageBackend::Postgres => postgres_builder(&config).await?,
    };

    builder
        .with_config(&config)?
        .serve(&config.server.bind)
        .await
}

#[cfg(feature = "postgres")]
async fn postgres_builder(config: &DashboardConfig) -> Result<DashboardBuilder> {
    use dashboard::core::service::CustomerService;
    use dashboard::storage::PostgresStore;
    use dashboard::storage::postgres::ensure_schema;
    use sqlx::postgres::PgPoolOptions;

    let url = config
        .storage
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("storage.url is required for the postgres backend"))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.storage.max_connections)
        .connect(url)
        .await?;
    ensure_schema(&pool).await?;

    let store = PostgresStore::new(pool);
    if config.storage.seed && CustomerService::list(&store).await?.is_empty() {
        seed_demo_data(&store, &store).await?;
    }
    Ok(DashboardBuilder::new().with_store(store))
}

#[cfg(not(feature = "postgres"))]
async fn postgres_builder(_config: &DashboardConfig) -> Result<DashboardBuilder> {
    anyhow::bail!("storage.backend is postgres but this binary was built without the `postgres` feature")
}
