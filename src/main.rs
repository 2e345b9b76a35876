use std::sync::Arc;

use hearth::config::Config;
use hearth::server::HttpServer;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let cfg = Config::load();
    let root = std::env::current_dir()?;

    let mut server = HttpServer::new(cfg.port);
    server.add_routes(&root)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    server.start_serving(shutdown_rx).await?;

    Ok(())
}
