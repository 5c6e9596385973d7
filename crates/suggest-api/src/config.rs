//! Server configuration
//!
//! Read once at startup; handlers only see the resulting value.

use std::path::PathBuf;

/// Default directory for uploaded audio files
const DEFAULT_UPLOAD_DIR: &str = "/user_data/tmp";

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Base URL of the speech-to-text service, when configured
    pub whisper_url: Option<String>,
    /// Display name used by the conversational responder; may be empty
    pub user_name: String,
    /// Directory where uploaded audio files are persisted
    pub upload_dir: PathBuf,
}

impl ServerConfig {
    /// Build the configuration from `HOST`, `PORT`, `WHISPER_API_URL`,
    /// `USER_NAME` and `UPLOAD_DIR`
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            whisper_url: std::env::var("WHISPER_API_URL")
                .ok()
                .filter(|u| !u.is_empty()),
            user_name: std::env::var("USER_NAME").unwrap_or_default(),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            whisper_url: None,
            user_name: String::new(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
        }
    }
}
