//! Startup orchestration.
//!
//! Order: metrics exporter, listener bind, server construction, serve until
//! an interrupt arrives. Any startup error is fatal and returned to `main`.

use std::error::Error;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Start the relay and block until it has shut down.
pub async fn start(config: RelayConfig) -> Result<(), Box<dyn Error>> {
    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        service = %config.service_name,
        index = %config.assets.index_path.display(),
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Listening for connections (Ctrl+C to stop)"
    );

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_interrupt().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
