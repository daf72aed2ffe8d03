//! Application and relay configuration

mod app_config;
mod relay;

pub use app_config::{AppConfig, LogFormat, LoggingConfig, ServerConfig};
pub use relay::{DEFAULT_BASE_URL, RelaySettings};
