use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use advertisement::{api::create_router, application::builder::ApplicationBuilder, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting advertisement service");

    let config = Config::from_env();
    config.validate().map_err(anyhow::Error::msg)?;
    info!("Configuration loaded and validated");

    let listen_addr = config.listen_addr.clone();

    let state = ApplicationBuilder::new(config)
        .with_database()
        .await
        .map_err(|e| anyhow::anyhow!("database setup failed: {e}"))?
        .with_infrastructure()
        .await
        .map_err(|e| anyhow::anyhow!("infrastructure setup failed: {e}"))?
        .with_security()
        .build()
        .map_err(|e| anyhow::anyhow!("application setup failed: {e}"))?;

    let app = create_router(state);

    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
