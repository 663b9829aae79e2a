use ingest_gateway::config::GatewayConfig;
use ingest_gateway::router::create_router;
use ingest_gateway::state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting ingestion intake gateway");

    let config = GatewayConfig::from_env();
    let state = AppState::new(&config);

    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
