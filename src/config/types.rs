// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served to clients; resolved to an absolute path at startup
    pub root_dir: PathBuf,
    /// Ports tried in order when the primary port is already bound
    #[serde(default = "default_fallback_ports")]
    pub fallback_ports: Vec<u16>,
}

fn default_fallback_ports() -> Vec<u16> {
    vec![8001]
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Add permissive CORS headers to every response and answer preflights
    pub enable_cors: bool,
    /// Render an HTML listing for directories without an index.html
    pub directory_listing: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

/// Browser auto-launch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Open the system browser shortly after the listener is bound
    pub open: bool,
    /// Path opened in the browser, e.g. "/" or "/status.html"
    pub landing_page: String,
}
