//! Server settings read once from the environment at startup.

use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL without trailing slash, used to build logo URLs.
    pub base_url: String,
    /// Directory served under `/uploads`.
    pub uploads_dir: PathBuf,
}

impl ServerConfig {
    /// HOST (default 0.0.0.0), PORT (default 8080), BASE_URL (default
    /// http://localhost:{PORT}), UPLOADS_DIR (default ./uploads).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let base_url = std::env::var("BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{}", port));
        let uploads_dir = std::env::var("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));
        Self {
            host,
            port,
            base_url,
            uploads_dir,
        }
    }

    pub fn logo_url(&self, file_name: &str) -> String {
        format!("{}/uploads/{}", self.base_url, file_name.trim_start_matches('/'))
    }
}
