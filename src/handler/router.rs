//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, static file
//! dispatch, CORS header application, access logging.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let ctx = RequestContext {
        path: &path,
        is_head: method == Method::HEAD,
    };

    let mut response = match method {
        Method::GET | Method::HEAD => static_files::serve(&ctx, &state).await,
        // Preflight: bare 200, no body; CORS headers added below
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    if state.config.http.enable_cors {
        http::apply_cors(&mut response);
    }

    if state.config.logging.access_log {
        let bytes = response
            .headers()
            .get("Content-Length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        logger::log_access(
            &remote_addr,
            method.as_str(),
            &path,
            response.status().as_u16(),
            bytes,
        );
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    fn test_state(enable_cors: bool) -> Arc<AppState> {
        let root = std::env::temp_dir().join(format!(
            "localserve-router-{}-{enable_cors}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("index.html"), b"<p>home</p>").unwrap();

        let mut cfg = Config::load_from("nonexistent-test-config").unwrap();
        cfg.server.root_dir = PathBuf::from(&root);
        cfg.http.enable_cors = enable_cors;
        cfg.logging.access_log = false;
        Arc::new(AppState::new(cfg).unwrap())
    }

    #[tokio::test]
    async fn serves_index_for_root() {
        let state = test_state(false);
        let ctx = RequestContext {
            path: "/",
            is_head: false,
        };
        let resp = static_files::serve(&ctx, &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn cors_headers_on_not_found() {
        let state = test_state(true);
        let ctx = RequestContext {
            path: "/missing.css",
            is_head: false,
        };
        let mut resp = static_files::serve(&ctx, &state).await;
        assert_eq!(resp.status(), 404);
        if state.config.http.enable_cors {
            http::apply_cors(&mut resp);
        }
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    }
}
