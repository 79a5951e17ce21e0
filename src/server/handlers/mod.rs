//! HTTP request handlers for the web server.

mod download;
mod helpers;
mod static_files;
mod upload;

// Re-export handlers for use by the router
pub use download::{direct_download, download_page};
pub use static_files::serve_css;
pub use upload::{index, process_upload};
