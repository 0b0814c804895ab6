use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serve a prebuilt single-page front-end from `dir`.
///
/// Files are served as-is; any path with no matching file gets
/// `dir/index.html` so client-side routes resolve.
pub fn spa_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
