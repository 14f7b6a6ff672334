//! Static file serving for the public directory.
//!
//! Files are served at their path relative to the public directory. A request
//! for a directory (including `/`) serves that directory's `index.html`.
//! Missing files are a plain 404.

use std::path::Path;

use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeader;

use crate::config::CACHE_CONTROL_STATIC;

/// Static file service with a public Cache-Control header.
pub type StaticService = SetResponseHeader<ServeDir, HeaderValue>;

/// Create a static file service rooted at `public_dir`.
pub fn create_static_service(public_dir: &Path) -> StaticService {
    let serve_dir = ServeDir::new(public_dir).append_index_html_on_directories(true);
    SetResponseHeader::if_not_present(
        serve_dir,
        CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_STATIC),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_static_service_missing_dir() {
        // Construction never touches the filesystem; missing files 404 at request time
        let _service = create_static_service(Path::new("/nonexistent/public"));
    }
}
