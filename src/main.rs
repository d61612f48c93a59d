use std::sync::Arc;

use storefront_api::{app, ensure_tables, AppState, PgGateway, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storefront_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "configuration loaded");

    let gateway = PgGateway::connect(&settings.database).await?;
    ensure_tables(&gateway).await?;
    let state = AppState::new(Arc::new(gateway), &settings.auth);

    let listener = TcpListener::bind(settings.server_addr()).await?;
    tracing::info!("storefront-api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
