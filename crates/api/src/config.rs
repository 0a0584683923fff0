use std::fmt::Display;
use std::str::FromStr;

use chrono::FixedOffset;

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Display timezone for grid day-bucketing, as a UTC offset in
    /// minutes. The grid never reads the host machine's local clock.
    pub grid_utc_offset_minutes: i32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Defaults: `HOST=0.0.0.0`, `PORT=3000`,
    /// `CORS_ORIGINS=http://localhost:5173`, `REQUEST_TIMEOUT_SECS=30`,
    /// `GRID_UTC_OFFSET_MINUTES=0`.
    pub fn from_env() -> Self {
        let config = Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_parsed("PORT", 3000),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", 30),
            grid_utc_offset_minutes: env_parsed("GRID_UTC_OFFSET_MINUTES", 0),
        };

        // Surface an unrepresentable offset at boot, not at the first
        // grid request.
        config.grid_offset();

        config
    }

    /// The configured grid display timezone as a `chrono` fixed offset.
    pub fn grid_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.grid_utc_offset_minutes * 60)
            .expect("GRID_UTC_OFFSET_MINUTES must be within +/- 24 hours")
    }
}

/// Read an env var and parse it, falling back to `default` when unset.
/// Panics on an unparseable value.
fn env_parsed<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|err| panic!("{name} is invalid: {err}")),
        Err(_) => default,
    }
}
