// Configuration module entry point
// Loads configuration from file and environment, holds shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::Error;

// Re-export public types
pub use state::AppState;
pub use types::{BrowserConfig, Config, HttpConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from the default `localserve.toml` (optional)
    /// plus environment overrides such as `LOCALSERVE_SERVER__PORT` and
    /// `LOCALSERVE_SERVER__ROOT_DIR`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("localserve")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("LOCALSERVE").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.root_dir", ".")?
            .set_default("http.enable_cors", false)?
            .set_default("http.directory_listing", true)?
            .set_default("logging.access_log", true)?
            .set_default("browser.open", false)?
            .set_default("browser.landing_page", "/")?
            .build()?;

        settings.try_deserialize()
    }
}

impl ServerConfig {
    /// Primary listen address from the configured host/port pair.
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| Error::Address(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_development() {
        let cfg = Config::load_from("nonexistent-test-config").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.fallback_ports, vec![8001]);
        assert!(!cfg.http.enable_cors);
        assert!(cfg.http.directory_listing);
        assert!(!cfg.browser.open);
        assert_eq!(cfg.browser.landing_page, "/");
    }

    #[test]
    fn socket_addr_parses_defaults() {
        let cfg = Config::load_from("nonexistent-test-config").unwrap();
        let addr = cfg.server.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
        assert!(addr.ip().is_loopback());
    }
}
