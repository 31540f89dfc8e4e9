// Listener module
// Binds the TCP listener, retrying on configured fallback ports when the
// primary port is already in use.

use std::io::ErrorKind;
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::Error;
use crate::logger;

/// Bind the configured address, falling back through `fallback_ports`.
///
/// Only `AddrInUse` triggers the fallback path; any other bind failure is
/// fatal immediately. Returns the listener together with the address it
/// actually bound, which may differ from the configured port.
pub fn bind_with_fallback(config: &ServerConfig) -> Result<(TcpListener, SocketAddr), Error> {
    let primary = config.socket_addr()?;

    let mut last_err = match bind_listener(primary) {
        Ok(listener) => return finish(listener, primary),
        Err(e) if e.kind() == ErrorKind::AddrInUse => e,
        Err(e) => {
            return Err(Error::Bind {
                addr: primary,
                source: e,
            })
        }
    };

    for port in &config.fallback_ports {
        let fallback = SocketAddr::new(primary.ip(), *port);
        logger::log_fallback_bind(&primary, &fallback);
        match bind_listener(fallback) {
            Ok(listener) => return finish(listener, fallback),
            Err(e) => last_err = e,
        }
    }

    Err(Error::Bind {
        addr: primary,
        source: last_err,
    })
}

fn finish(listener: TcpListener, addr: SocketAddr) -> Result<(TcpListener, SocketAddr), Error> {
    // Port 0 binds an ephemeral port; report the real one
    let local = listener.local_addr().unwrap_or(addr);
    Ok((listener, local))
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled.
///
/// `SO_REUSEADDR` allows rebinding a port still in `TIME_WAIT` after a
/// quick stop/start cycle, which is constant during local development.
fn bind_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn server_config(port: u16, fallback_ports: Vec<u16>) -> ServerConfig {
        let mut cfg = Config::load_from("nonexistent-test-config").unwrap();
        cfg.server.port = port;
        cfg.server.fallback_ports = fallback_ports;
        cfg.server
    }

    #[tokio::test]
    async fn binds_primary_when_free() {
        // Port 0 asks the kernel for a free port
        let cfg = server_config(0, vec![]);
        let (_listener, addr) = bind_with_fallback(&cfg).unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn falls_back_when_primary_occupied() {
        let occupier = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let taken = occupier.local_addr().unwrap().port();

        let cfg = server_config(taken, vec![0]);
        let (_listener, addr) = bind_with_fallback(&cfg).unwrap();
        assert_ne!(addr.port(), taken);
    }

    #[tokio::test]
    async fn fails_when_all_ports_occupied() {
        let occupier = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let taken = occupier.local_addr().unwrap().port();

        let cfg = server_config(taken, vec![taken]);
        let err = bind_with_fallback(&cfg).unwrap_err();
        assert!(matches!(err, Error::Bind { .. }));
    }
}
