// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::spawn_serve;
use crate::config::AppState;
use crate::logger;

/// Accept loop: serves connections until `shutdown` is notified.
///
/// Accept errors are logged and never terminate the loop; on shutdown the
/// listener is dropped so no new connections are accepted, while in-flight
/// request tasks finish on their own (best-effort drain).
pub async fn run_accept_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_serve(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    drop(listener);
}
