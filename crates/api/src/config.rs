use escapade_core::clock::RewardCalendar;

use crate::auth::jwt::JwtConfig;

/// Default reward timezone: UTC+9 (KST).
const DEFAULT_REWARD_OFFSET_MINUTES: i32 = 540;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Offset of the reward timezone east of UTC, in minutes.
    pub reward_utc_offset_minutes: i32,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `REWARD_UTC_OFFSET_MINUTES` | `540`                      |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let reward_utc_offset_minutes: i32 = std::env::var("REWARD_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|_| DEFAULT_REWARD_OFFSET_MINUTES.to_string())
            .parse()
            .expect("REWARD_UTC_OFFSET_MINUTES must be a valid i32");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            reward_utc_offset_minutes,
            jwt,
        }
    }

    /// The reward calendar for the configured offset.
    pub fn reward_calendar(&self) -> Result<RewardCalendar, escapade_core::error::CoreError> {
        RewardCalendar::from_offset_minutes(self.reward_utc_offset_minutes)
    }
}
