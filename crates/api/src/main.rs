use std::sync::Arc;

use anyhow::Context as _;

use inventario_infra::{ApiConfig, InMemoryInventoryStore, InventoryStore, PostgrestStore, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing `.env` is fine; real deployments set the variables directly.
    let _ = dotenvy::dotenv();
    inventario_observability::init();

    let api = ApiConfig::from_env().context("invalid api configuration")?;

    let store: Arc<dyn InventoryStore> = match StoreConfig::from_env()
        .context("invalid store configuration")?
    {
        Some(config) => {
            tracing::info!(url = %config.base_url(), "using hosted store");
            Arc::new(PostgrestStore::new(&config).context("failed to build store client")?)
        }
        None => {
            tracing::warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set; using in-memory store");
            Arc::new(InMemoryInventoryStore::seeded())
        }
    };

    inventario_app::bootstrap(store.as_ref()).await;

    let app = inventario_api::app::build_app(inventario_api::app::services::AppServices::new(store));

    let listener = tokio::net::TcpListener::bind(api.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", api.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
