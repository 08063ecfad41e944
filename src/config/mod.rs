//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! argv / PORT env
//!     → loader.rs (clap parse, map onto defaults)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → moved into HttpServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never changes afterwards
//! - All fields have defaults so only the port needs to be known
//! - Validation separates syntactic (clap/serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, ServerArgs};
pub use schema::RelayConfig;
pub use schema::UpstreamConfig;
