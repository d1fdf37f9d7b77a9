//! Back-office single-page app.
//!
//! Assets are embedded from `frontend/dist/` at compile time. Files under
//! `./frontend-custom/` take precedence, and unknown paths fall back to
//! `index.html` so client-side routing works.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::services::system::DynamicConfig;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX: &str = "index.html";
const OVERRIDE_DIR: &str = "./frontend-custom";

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn content_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "txt" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Hashed build artefacts never change under the same name.
fn cache_control(path: &str) -> &'static str {
    match extension(path) {
        "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "gif" | "svg"
        | "webp" => "public, max-age=31536000, immutable",
        _ => "no-cache, no-store, must-revalidate",
    }
}

/// Fills the placeholders the frontend build leaves in its HTML.
fn process_html(content: &[u8], cooperative_name: &str) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%BASE_PATH%", "")
        .replace("%COOPERATIVE_NAME%", cooperative_name)
        .into_bytes()
}

fn load(path: &str) -> Option<Vec<u8>> {
    std::fs::read(Path::new(OVERRIDE_DIR).join(path))
        .ok()
        .or_else(|| FrontendAssets::get(path).map(|f| f.data.into_owned()))
}

/// Resolves a request path to `(served path, bytes)`, falling back to the
/// index page.
fn resolve(path: &str) -> Option<(&str, Vec<u8>)> {
    let path = path.trim_start_matches('/');
    if !path.is_empty() && !path.contains("..") {
        if let Some(data) = load(path) {
            return Some((path, data));
        }
    }
    load(INDEX).map(|data| (INDEX, data))
}

const MISSING_BUILD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Edu Coop</title></head>
<body>
<h1>Back office not built</h1>
<p>Run <code>bun run build</code> inside <code>frontend/</code> and rebuild the server.</p>
</body>
</html>"#;

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let Some((path, mut data)) = resolve(req.match_info().query("tail")) else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(MISSING_BUILD_PAGE));
    };

    let mime = content_type(path);
    if mime.starts_with("text/html") {
        data = process_html(&data, &DynamicConfig::cooperative_name().await);
    }

    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Cache-Control", cache_control(path)))
        .body(data))
}

/// Registered last: every path not claimed by an API scope lands here.
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type("assets/app.mjs"), "application/javascript; charset=utf-8");
        assert_eq!(content_type("logo.svg"), "image/svg+xml");
        assert_eq!(content_type("archive.tar.xz"), "application/octet-stream");
    }

    #[test]
    fn test_process_html_placeholders() {
        let html = b"<title>%COOPERATIVE_NAME%</title><base href=\"%BASE_PATH%/\">";
        let out = String::from_utf8(process_html(html, "Coop Savoir")).unwrap();
        assert_eq!(out, "<title>Coop Savoir</title><base href=\"/\">");
    }

    #[test]
    fn test_cache_control() {
        assert!(cache_control("assets/app.js").contains("immutable"));
        assert!(cache_control("index.html").starts_with("no-cache"));
        assert!(cache_control("manifest.json").starts_with("no-cache"));
    }

    #[test]
    fn test_unknown_paths_fall_back_to_index() {
        // build.rs guarantees an index page even without a frontend build
        let (path, _) = resolve("/students/42/payments").unwrap();
        assert_eq!(path, INDEX);
        let (path, _) = resolve("../Cargo.toml").unwrap();
        assert_eq!(path, INDEX);
    }
}
