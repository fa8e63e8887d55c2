//! Public API for configuration

pub mod loader;
pub mod model;

// Re-export the main entrypoints:
pub use loader::{config_path, load};
pub use model::{Config, ConfigError, DatabaseConfig, GeneratorConfig, IngestConfig, LoggingConfig};
