//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the attendance API
    pub api_base_url: String,
    /// File where the session credential is persisted across runs
    pub session_file: PathBuf,
    /// Path of the token refresh endpoint, joined to `api_base_url`
    pub refresh_path: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            session_file: PathBuf::from("attendance-session.json"),
            refresh_path: "/api/auth/token/refresh/".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default, so this never fails; a `.env` file is
    /// honored if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            api_base_url: env::var("ATTENDANCE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            session_file: env::var("ATTENDANCE_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("attendance-session.json")),
            refresh_path: env::var("ATTENDANCE_REFRESH_PATH")
                .unwrap_or_else(|_| "/api/auth/token/refresh/".to_string()),
        }
    }
}
