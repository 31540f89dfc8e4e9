//! Logger module
//!
//! Stdout/stderr logging for the development server: lifecycle messages,
//! access log lines in Common Log Format, and error/warning output.

use std::net::SocketAddr;
use std::path::Path;

use chrono::Local;

use crate::config::Config;

fn write_info(message: &str) {
    println!("{message}");
}

fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    write_info("======================================");
    write_info("Development server started");
    write_info(&format!("Serving directory: {}", root.display()));
    write_info(&format!("Listening on: http://{addr}"));
    if config.http.enable_cors {
        write_info("CORS headers enabled (Access-Control-Allow-Origin: *)");
    }
    if config.browser.open {
        write_info(&format!(
            "Opening browser at: http://{addr}{}",
            config.browser.landing_page
        ));
    }
    write_info("Press Ctrl+C to stop");
    write_info("======================================\n");
}

/// Common Log Format line for a completed request
pub fn log_access(remote_addr: &SocketAddr, method: &str, path: &str, status: u16, bytes: usize) {
    write_info(&format!(
        "{} - - [{}] \"{} {} HTTP/1.1\" {} {}",
        remote_addr.ip(),
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        status,
        bytes,
    ));
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

/// Security-relevant event: a request path tried to escape the root
pub fn log_traversal_blocked(path: &str) {
    write_error(&format!("[WARN] Path traversal attempt blocked: {path}"));
}

pub fn log_fallback_bind(primary: &SocketAddr, fallback: &SocketAddr) {
    write_error(&format!(
        "[WARN] Port {} is already in use, retrying on {}",
        primary.port(),
        fallback.port()
    ));
}

pub fn log_shutdown() {
    write_info("\nShutdown signal received, closing listener");
}
