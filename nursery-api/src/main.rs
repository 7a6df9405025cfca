use std::net::SocketAddr;

use nursery_api::{app, AppState};
use nursery_store::app_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nursery_api=debug,nursery_core=info,nursery_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let store = nursery_store::connect(&config.store).await?;
    let app = app(AppState::new(store, &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server running on port {}", config.server.port);

    axum::serve(listener, app).await?;
    Ok(())
}
