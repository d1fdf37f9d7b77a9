use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.exists() {
        println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
        create_fallback_files(&dist_path);
    }
}

// rust-embed needs the folder to exist at compile time.
fn create_fallback_files(dist_path: &Path) {
    fs::create_dir_all(dist_path.join("assets")).expect("Failed to create dist directory");

    let fallback_html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>%COOPERATIVE_NAME%</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 600px;
            margin: 100px auto;
            padding: 20px;
            text-align: center;
        }
        .notice {
            background: #eef6ff;
            border: 1px solid #b6d4fe;
            padding: 20px;
            border-radius: 8px;
        }
        code {
            background: #f1f3f4;
            padding: 2px 6px;
            border-radius: 4px;
        }
    </style>
</head>
<body>
    <h1>%COOPERATIVE_NAME%</h1>
    <div class="notice">
        <p>The back-office frontend has not been built. The API is available under <code>/api/v1</code>.</p>
        <p><code>cd frontend &amp;&amp; bun install &amp;&amp; bun run build</code></p>
    </div>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), fallback_html)
        .expect("Failed to write fallback index.html");
    fs::write(dist_path.join("favicon.ico"), []).expect("Failed to write fallback favicon");
}
