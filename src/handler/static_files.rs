//! Static file serving module
//!
//! Maps request paths onto the root directory, enforces the containment
//! invariant, and builds file/listing responses.

use std::path::{Component, Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, mime, response};
use crate::logger;

/// Outcome of mapping a request path onto the root directory
#[derive(Debug, PartialEq, Eq)]
pub enum ResolvedPath {
    File(PathBuf),
    Directory(PathBuf),
    NotFound,
    /// The path tried to escape the root (traversal)
    Forbidden,
}

/// Serve a request path from the root directory.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve_path(&state.root, ctx.path) {
        ResolvedPath::Forbidden => {
            logger::log_traversal_blocked(ctx.path);
            http::build_403_response()
        }
        ResolvedPath::NotFound => http::build_404_response(),
        ResolvedPath::File(file_path) => serve_file(&file_path, ctx.is_head).await,
        ResolvedPath::Directory(dir_path) => serve_dir(ctx, state, &dir_path).await,
    }
}

/// Map a request path to a filesystem path under `root`.
///
/// The containment invariant: a `..` segment is rejected before any
/// filesystem access, and the canonicalized result must still live under
/// the canonicalized root (covers symlinks pointing outside).
pub fn resolve_path(root: &Path, request_path: &str) -> ResolvedPath {
    let decoded = decode_percent(request_path);
    let relative = decoded.trim_start_matches('/');

    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return ResolvedPath::Forbidden;
    }

    let joined = root.join(relative);

    // Missing files cannot be canonicalized; treat as 404
    let Ok(canonical) = joined.canonicalize() else {
        return ResolvedPath::NotFound;
    };
    if !canonical.starts_with(root) {
        return ResolvedPath::Forbidden;
    }

    if canonical.is_dir() {
        ResolvedPath::Directory(canonical)
    } else {
        ResolvedPath::File(canonical)
    }
}

/// Percent-decode a request path. Invalid escapes are kept literally.
fn decode_percent(path: &str) -> String {
    let mut bytes = Vec::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    bytes.push(byte);
                    continue;
                }
            }
            bytes.push(b'%');
            bytes.extend_from_slice(hex.as_bytes());
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

async fn serve_file(file_path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(file_path).await {
        Ok(content) => {
            let content_type =
                mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
            response::build_file_response(content, content_type, is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            http::build_404_response()
        }
    }
}

/// Serve a directory: index.html when present, HTML listing otherwise.
async fn serve_dir(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir_path: &Path,
) -> Response<Full<Bytes>> {
    let index_path = dir_path.join("index.html");
    if index_path.is_file() {
        return serve_file(&index_path, ctx.is_head).await;
    }

    if !state.config.http.directory_listing {
        return http::build_403_response();
    }

    match listing::render(dir_path, ctx.path).await {
        Ok(html) => response::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir_path.display()
            ));
            http::build_404_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "localserve-static-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("assets")).unwrap();
        std::fs::write(root.join("status.html"), b"<h1>ok</h1>").unwrap();
        std::fs::write(root.join("assets/app.js"), b"console.log(1);").unwrap();
        root.canonicalize().unwrap()
    }

    #[test]
    fn resolves_existing_file() {
        let root = test_root("file");
        match resolve_path(&root, "/status.html") {
            ResolvedPath::File(p) => assert!(p.ends_with("status.html")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn resolves_nested_file() {
        let root = test_root("nested");
        match resolve_path(&root, "/assets/app.js") {
            ResolvedPath::File(p) => assert!(p.ends_with("assets/app.js")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let root = test_root("missing");
        assert_eq!(resolve_path(&root, "/nope.html"), ResolvedPath::NotFound);
    }

    #[test]
    fn root_path_is_directory() {
        let root = test_root("dir");
        assert_eq!(
            resolve_path(&root, "/"),
            ResolvedPath::Directory(root.clone())
        );
    }

    #[test]
    fn traversal_is_forbidden() {
        let root = test_root("traversal");
        assert_eq!(
            resolve_path(&root, "/../etc/passwd"),
            ResolvedPath::Forbidden
        );
        assert_eq!(
            resolve_path(&root, "/assets/../../secret"),
            ResolvedPath::Forbidden
        );
    }

    #[test]
    fn encoded_traversal_is_forbidden() {
        let root = test_root("encoded");
        assert_eq!(
            resolve_path(&root, "/%2e%2e/etc/passwd"),
            ResolvedPath::Forbidden
        );
    }

    #[test]
    fn decode_handles_escapes() {
        assert_eq!(decode_percent("/a%20b.txt"), "/a b.txt");
        assert_eq!(decode_percent("/plain.css"), "/plain.css");
        // Invalid escape kept literally
        assert_eq!(decode_percent("/50%25off"), "/50%off");
        assert_eq!(decode_percent("/bad%zz"), "/bad%zz");
    }

    #[tokio::test]
    async fn served_file_is_byte_identical() {
        let root = test_root("serve");
        let ctx = RequestContext {
            path: "/status.html",
            is_head: false,
        };
        let mut cfg = crate::config::Config::load_from("nonexistent-test-config").unwrap();
        cfg.server.root_dir = root.clone();
        let state = AppState::new(cfg).unwrap();

        let resp = serve(&ctx, &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
        assert_eq!(resp.headers()["Content-Length"], "11");

        use http_body_util::BodyExt;
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>ok</h1>");
    }
}
