//! Configuration module for the team members backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! Image URL settings are an explicit value passed into the transform layer,
//! never read from ambient process state at call sites.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Settings for synthesizing image asset URLs.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Project identifier segment of asset URLs
    pub project_id: String,
    /// Dataset segment of asset URLs
    pub dataset: String,
    /// Serve assets from the CDN host rather than the origin host
    pub use_cdn: bool,
    /// Base URL of the asset CDN
    pub cdn_base_url: String,
    /// Base URL of the asset origin
    pub origin_base_url: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Image asset URL settings
    pub images: ImageConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("TEAM_API_PSK").ok();

        let db_path = env::var("TEAM_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("TEAM_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid TEAM_BIND_ADDR format");

        let log_level = env::var("TEAM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let images = ImageConfig {
            project_id: env::var("TEAM_PROJECT_ID").unwrap_or_else(|_| "default".to_string()),
            dataset: env::var("TEAM_DATASET").unwrap_or_else(|_| "production".to_string()),
            use_cdn: env::var("TEAM_USE_CDN")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
            cdn_base_url: env::var("TEAM_CDN_BASE_URL")
                .unwrap_or_else(|_| "https://cdn.example.com/images".to_string()),
            origin_base_url: env::var("TEAM_ORIGIN_BASE_URL")
                .unwrap_or_else(|_| "https://assets.example.com/images".to_string()),
        };

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            images,
        }
    }
}
