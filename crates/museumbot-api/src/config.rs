//! Server configuration read from the environment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::error::AppError;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// PostgreSQL URL (`DATABASE_URL`). In-memory storage when absent.
    pub database_url: Option<String>,
    /// Probability that a requested date is available
    /// (`AVAILABILITY_RATE`, default `0.8`).
    pub availability_rate: f64,
    /// Messages allowed per identity per window
    /// (`RATE_LIMIT_MAX_MESSAGES`, default `10`).
    pub rate_limit_max_messages: usize,
    /// Rate limiting window (`RATE_LIMIT_WINDOW_SECS`, default `60`).
    pub rate_limit_window: TimeDelta,
    /// Browser origins allowed to call the API (`CORS_ALLOWED_ORIGINS`,
    /// comma-separated). Any origin is allowed when empty.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 3000_u16)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let availability_rate = parse_or(&lookup, "AVAILABILITY_RATE", 0.8_f64)?;
        if !(0.0..=1.0).contains(&availability_rate) {
            return Err(AppError::Config(format!(
                "AVAILABILITY_RATE must be between 0 and 1, got {availability_rate}"
            )));
        }

        let rate_limit_max_messages = parse_or(&lookup, "RATE_LIMIT_MAX_MESSAGES", 10_usize)?;
        let window_secs = parse_or(&lookup, "RATE_LIMIT_WINDOW_SECS", 60_i64)?;
        if window_secs <= 0 {
            return Err(AppError::Config(
                "RATE_LIMIT_WINDOW_SECS must be positive".to_string(),
            ));
        }
        let rate_limit_window = TimeDelta::try_seconds(window_secs).ok_or_else(|| {
            AppError::Config(format!("RATE_LIMIT_WINDOW_SECS is out of range: {window_secs}"))
        })?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            availability_rate,
            rate_limit_max_messages,
            rate_limit_window,
            cors_allowed_origins,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host:port` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid value: {e}"))),
        None => Ok(default),
    }
}
