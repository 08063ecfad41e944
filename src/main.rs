//! api-relay
//!
//! A local server that hosts a single-page API explorer and relays
//! browser-described HTTP requests server-side, sidestepping CORS.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  API RELAY                    │
//!   Browser            │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ───────────────────┼─▶│  http   │──▶│  relay   │──▶│ upstream  │──┼──▶ Remote
//!                      │  │ server  │   │ validate │   │  client   │  │    origin
//!   ◀──────────────────┼──│ + pages │◀──│normalize │◀──│ (15s cap) │◀─┼───
//!                      │  └─────────┘   └──────────┘   └───────────┘  │
//!                      │  ┌──────────┐ ┌───────────────┐ ┌──────────┐ │
//!                      │  │  config  │ │ observability │ │lifecycle │ │
//!                      │  └──────────┘ └───────────────┘ └──────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use api_relay::config::{load_config, ServerArgs};
use api_relay::lifecycle::startup;
use api_relay::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(ServerArgs::parse())?;
    logging::init_logging(&config.observability.log_level);

    tracing::info!("api-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    startup::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
