//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Human readable service name
    pub app_name: String,
    /// Timezone used when a request does not name one
    pub default_timezone: String,
    /// Cache time-to-live in seconds
    pub cache_ttl_seconds: u64,
    /// Background sweep interval in seconds, 0 disables the sweeper
    pub sweep_interval_seconds: u64,
    /// Interface to bind
    pub host: String,
    /// HTTP server port
    pub port: u16,
}

/// Reads `name` and parses it, falling back to `default` when unset or invalid.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `COUNTDOWN_APP_NAME` - Service name (default: "Countdown Service")
    /// - `COUNTDOWN_DEFAULT_TIMEZONE` - Fallback IANA timezone (default: "UTC")
    /// - `COUNTDOWN_CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 60)
    /// - `COUNTDOWN_SWEEP_INTERVAL_SECONDS` - Sweep frequency, 0 = off (default: 0)
    /// - `HOST` - Bind address (default: 0.0.0.0)
    /// - `PORT` - HTTP server port (default: 8000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_name: env_or("COUNTDOWN_APP_NAME", defaults.app_name),
            default_timezone: env_or("COUNTDOWN_DEFAULT_TIMEZONE", defaults.default_timezone),
            cache_ttl_seconds: env_or("COUNTDOWN_CACHE_TTL_SECONDS", defaults.cache_ttl_seconds),
            sweep_interval_seconds: env_or(
                "COUNTDOWN_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
            host: env_or("HOST", defaults.host),
            port: env_or("PORT", defaults.port),
        }
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Countdown Service".to_string(),
            default_timezone: "UTC".to_string(),
            cache_ttl_seconds: 60,
            sweep_interval_seconds: 0,
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}
