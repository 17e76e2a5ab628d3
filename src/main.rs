use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod db;
mod settings;

use db::ConnectionConfig;
use settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Settings first so a `.env`-supplied RUST_LOG still reaches the filter.
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing();

    info!("anteroom starting");

    let config = ConnectionConfig::new(settings.mongo.uri, settings.mongo.database);

    // The attempt must not block startup; its outcome only ever reaches the
    // log stream.
    tokio::spawn(bootstrap::run(config));

    shutdown_signal().await;
    info!("anteroom shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
