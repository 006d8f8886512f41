/// Configuration management for board-service
///
/// Settings are loaded from environment variables with development-friendly
/// defaults; `dotenvy` is applied at bootstrap before this runs.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Posting rate-limit configuration
    pub rate_limit: RateLimitSettings,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Posting rate-limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Maximum posts per user within the window
    pub max_posts: u32,
    /// Window length in seconds
    pub window_secs: u64,
    /// Interval between sweeps of idle window entries, in seconds
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(4000),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/board".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            rate_limit: RateLimitSettings {
                max_posts: std::env::var("RATE_LIMIT_MAX_POSTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3_600),
                sweep_interval_secs: std::env::var("RATE_LIMIT_SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(600),
            },
        })
    }
}
