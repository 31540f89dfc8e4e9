//! Browser auto-launch module
//!
//! Fire-and-forget convenience: shortly after the listener is bound, open
//! the system browser on the landing page. Has no interaction with the
//! server's readiness; failures are logged and ignored.

use std::net::SocketAddr;
use std::process::Command;
use std::time::Duration;

use crate::logger;

const LAUNCH_DELAY: Duration = Duration::from_secs(1);

/// Schedule the browser launch on a background task.
pub fn launch_after_delay(addr: SocketAddr, landing_page: String) {
    tokio::spawn(async move {
        tokio::time::sleep(LAUNCH_DELAY).await;
        let url = format!("http://{addr}{landing_page}");
        match open_url(&url) {
            Ok(()) => logger::log_info(&format!("Opened browser at {url}")),
            Err(e) => logger::log_warning(&format!(
                "Could not open browser ({e}); open {url} manually"
            )),
        }
    });
}

#[cfg(target_os = "macos")]
fn open_url(url: &str) -> std::io::Result<()> {
    Command::new("open").arg(url).spawn().map(|_| ())
}

#[cfg(target_os = "windows")]
fn open_url(url: &str) -> std::io::Result<()> {
    Command::new("cmd").args(["/C", "start", "", url]).spawn().map(|_| ())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url(url: &str) -> std::io::Result<()> {
    Command::new("xdg-open").arg(url).spawn().map(|_| ())
}
