//! File-extension based mime detection for served content.

use std::path::Path;

/// Fallback for unknown or missing extensions.
pub const DEFAULT_MIME: &str = "text/plain";

/// Guess the mime type of a content file from its extension.
pub fn mime_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "md" | "markdown" => "text/markdown",
        "json" => "application/json",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "rs" => "text/x-rust",
        "js" | "mjs" => "text/javascript",
        "ts" => "text/x-typescript",
        "html" | "htm" => "text/html",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        _ => DEFAULT_MIME,
    }
}

/// Whether content of this mime type should be served as text rather than a blob.
pub fn is_textual(mime: &str) -> bool {
    mime.starts_with("text/")
        || matches!(
            mime,
            "application/json" | "application/yaml" | "application/toml" | "image/svg+xml"
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(mime_for("README.md"), "text/markdown");
        assert_eq!(mime_for("docs/API.MD"), "text/markdown");
        assert_eq!(mime_for("openapi.json"), "application/json");
        assert_eq!(mime_for("src/lib.rs"), "text/x-rust");
        assert_eq!(mime_for("config.yml"), "application/yaml");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(mime_for("LICENSE"), DEFAULT_MIME);
        assert_eq!(mime_for("archive.tar.zst"), DEFAULT_MIME);
    }

    #[test]
    fn test_textual() {
        assert!(is_textual("text/markdown"));
        assert!(is_textual("application/json"));
        assert!(!is_textual("image/png"));
    }
}
