//! Application configuration module.
//!
//! Manages the TOML config file holding the API key and an optional
//! base URL override.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig};
pub use paths::resolve_config_path;
