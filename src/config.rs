//! Configuration Module
//!
//! Handles loading the demo binary's configuration from environment
//! variables. The library itself reads no environment.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Redis server at `redis_url`
    Redis,
    /// In-process store, no server required
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(BackendKind::Redis),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Redis => write!(f, "redis"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

/// How replay reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayFormat {
    Text,
    Json,
}

impl FromStr for ReplayFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReplayFormat::Text),
            "json" => Ok(ReplayFormat::Json),
            other => Err(format!("unknown replay format: {}", other)),
        }
    }
}

/// Demo configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which store backend to open
    pub backend: BackendKind,
    /// Redis connection URL
    pub redis_url: String,
    /// Cached page TTL in seconds
    pub page_ttl: u64,
    /// Memory backend cleanup interval in seconds
    pub cleanup_interval: u64,
    /// Page fetched by the web cache demo
    pub demo_url: String,
    /// Output format of replay reports
    pub replay_format: ReplayFormat,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `STORE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1/)
    /// - `PAGE_TTL` - Cached page TTL in seconds (default: 10)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `DEMO_URL` - Page fetched by the demo (default: http://example.com)
    /// - `REPLAY_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: parse_var("STORE_BACKEND").unwrap_or(defaults.backend),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            page_ttl: parse_positive("PAGE_TTL").unwrap_or(defaults.page_ttl),
            cleanup_interval: parse_positive("CLEANUP_INTERVAL")
                .unwrap_or(defaults.cleanup_interval),
            demo_url: env::var("DEMO_URL").unwrap_or(defaults.demo_url),
            replay_format: parse_var("REPLAY_FORMAT").unwrap_or(defaults.replay_format),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Like `parse_var`, but zero counts as unset.
fn parse_positive(name: &str) -> Option<u64> {
    parse_var::<u64>(name).filter(|secs| *secs > 0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Redis,
            redis_url: "redis://127.0.0.1/".to_string(),
            page_ttl: 10,
            cleanup_interval: 1,
            demo_url: "http://example.com".to_string(),
            replay_format: ReplayFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.redis_url, "redis://127.0.0.1/");
        assert_eq!(config.page_ttl, 10);
        assert_eq!(config.cleanup_interval, 1);
        assert_eq!(config.replay_format, ReplayFormat::Text);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("STORE_BACKEND");
        env::remove_var("REDIS_URL");
        env::remove_var("PAGE_TTL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("DEMO_URL");
        env::remove_var("REPLAY_FORMAT");

        let config = Config::from_env();
        assert_eq!(config.backend, BackendKind::Redis);
        assert_eq!(config.redis_url, "redis://127.0.0.1/");
        assert_eq!(config.page_ttl, 10);
        assert_eq!(config.cleanup_interval, 1);
        assert_eq!(config.demo_url, "http://example.com");
    }

    #[test]
    fn test_zero_seconds_falls_back() {
        // Dedicated names so parallel tests never see these values
        env::set_var("TEST_CONFIG_ZERO_SECS", "0");
        env::set_var("TEST_CONFIG_FIVE_SECS", "5");
        env::set_var("TEST_CONFIG_BAD_SECS", "-3");

        assert_eq!(parse_positive("TEST_CONFIG_ZERO_SECS"), None);
        assert_eq!(parse_positive("TEST_CONFIG_FIVE_SECS"), Some(5));
        assert_eq!(parse_positive("TEST_CONFIG_BAD_SECS"), None);
        assert_eq!(
            parse_positive("TEST_CONFIG_ZERO_SECS").unwrap_or(Config::default().cleanup_interval),
            1
        );

        env::remove_var("TEST_CONFIG_ZERO_SECS");
        env::remove_var("TEST_CONFIG_FIVE_SECS");
        env::remove_var("TEST_CONFIG_BAD_SECS");
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("memory".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert_eq!(" Redis ".parse::<BackendKind>(), Ok(BackendKind::Redis));
        assert!("sqlite".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::Memory.to_string(), "memory");
    }

    #[test]
    fn test_replay_format_parse() {
        assert_eq!("JSON".parse::<ReplayFormat>(), Ok(ReplayFormat::Json));
        assert!("yaml".parse::<ReplayFormat>().is_err());
    }
}
