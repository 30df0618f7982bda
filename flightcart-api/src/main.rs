use std::net::SocketAddr;
use std::sync::Arc;

use flightcart_api::{app, AppState};
use flightcart_store::{app_config::Config, InMemoryCartRepository, SerpApiClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flightcart_api=debug,flightcart_store=debug,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting flight cart API on port {}", config.server.port);
    tracing::debug!("Upstream config: {:?}", config.upstream);

    let app_state = AppState {
        cart: Arc::new(InMemoryCartRepository::new()),
        supplier: Arc::new(SerpApiClient::new(&config.upstream)),
        upstream: config.upstream.settings(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
