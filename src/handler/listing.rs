//! Directory listing module
//!
//! Renders an HTML index for directories that have no index.html.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tokio::fs;

/// Render an HTML listing for `dir`, linked relative to the request path.
///
/// Entries are sorted directories-first, then alphabetically; directory
/// names carry a trailing slash.
pub async fn render(dir: &Path, url_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let metadata = entry.metadata().await?;
        entries.push(Entry {
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
            name,
        });
    }

    entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    let mut rows = String::new();
    for entry in &entries {
        let display_name = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let href = format!("{}/{}", url_path.trim_end_matches('/'), entry.name);
        let size = if entry.is_dir {
            "-".to_string()
        } else {
            format_size(entry.size)
        };
        rows.push_str(&format!(
            "        <tr><td><a href=\"{href}\">{display_name}</a></td>\
             <td class=\"size\">{size}</td><td class=\"date\">{}</td></tr>\n",
            format_modified(entry.modified)
        ));
    }

    let parent = if url_path.trim_end_matches('/').is_empty() {
        String::new()
    } else {
        let parent_path = Path::new(url_path.trim_end_matches('/'))
            .parent()
            .map_or_else(|| "/".to_string(), |p| p.to_string_lossy().into_owned());
        format!("    <p><a href=\"{parent_path}\">../</a> (parent directory)</p>\n")
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Index of {url_path}</title>
    <style>
        body {{ font-family: monospace; margin: 2em; }}
        table {{ border-collapse: collapse; }}
        td {{ padding: 2px 16px 2px 0; }}
        .size, .date {{ color: #666; }}
    </style>
</head>
<body>
    <h1>Index of {url_path}</h1>
{parent}    <table>
{rows}    </table>
</body>
</html>"#
    ))
}

struct Entry {
    name: String,
    is_dir: bool,
    size: u64,
    modified: Option<SystemTime>,
}

fn format_modified(modified: Option<SystemTime>) -> String {
    modified.map_or_else(
        || "-".to_string(),
        |t| {
            DateTime::<Local>::from(t)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        },
    )
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}
