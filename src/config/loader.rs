//! Configuration loading from the command line and environment.

use clap::Parser;
use std::path::PathBuf;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Command-line arguments for the relay server.
#[derive(Debug, Parser)]
#[command(name = "api-relay")]
#[command(about = "Local HTTP relay for browser API exploration", long_about = None)]
pub struct ServerArgs {
    /// Port to listen on (all interfaces).
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path to the HTML page served at `/`.
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Name reported by `/api/health`.
    #[arg(long, default_value = env!("CARGO_PKG_NAME"))]
    pub service_name: String,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Serve Prometheus metrics on this address.
    #[arg(long)]
    pub metrics_address: Option<String>,
}

/// Build and validate the relay configuration from parsed arguments.
pub fn load_config(args: ServerArgs) -> Result<RelayConfig, ConfigError> {
    let mut config = RelayConfig::default();
    config.listener.bind_address = format!("0.0.0.0:{}", args.port);
    if let Some(index) = args.index {
        config.assets.index_path = index;
    }
    config.service_name = args.service_name;
    config.observability.log_level = args.log_level;
    config.observability.metrics_address = args.metrics_address;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
