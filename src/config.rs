//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env::{self, VarError};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};

/// Default bind address
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Default pause between two worker ticks, in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 2000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub server_host: IpAddr,
    /// HTTP server port
    pub server_port: u16,
    /// Pause between two ticks of the background worker, in milliseconds
    pub tick_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_HOST` - Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `TICK_INTERVAL_MS` - Worker tick interval in milliseconds (default: 2000)
    ///
    /// Unset variables fall back to their default. A variable that is set but
    /// does not parse is reported as [`AppError::InvalidConfig`].
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server_host: parse_var("SERVER_HOST", DEFAULT_HOST)?,
            server_port: parse_var("SERVER_PORT", DEFAULT_PORT)?,
            tick_interval_ms: parse_var("TICK_INTERVAL_MS", DEFAULT_TICK_INTERVAL_MS)?,
        };

        if config.tick_interval_ms == 0 {
            return Err(AppError::InvalidConfig(
                "TICK_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Interval the worker sleeps between two ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST,
            server_port: DEFAULT_PORT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidConfig(format!("{name}={raw:?} is not a valid value"))),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(raw)) => Err(AppError::InvalidConfig(format!(
            "{name}={raw:?} is not valid UTF-8"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-wide; keep these tests from interleaving
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");
        env::remove_var("TICK_INTERVAL_MS");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_host, DEFAULT_HOST);
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.tick_interval_ms, 2000);
        assert_eq!(config.tick_interval(), Duration::from_secs(2));
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_config_from_env_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_host, DEFAULT_HOST);
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.tick_interval_ms, 2000);
    }

    #[test]
    fn test_config_from_env_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("SERVER_HOST", "127.0.0.1");
        env::set_var("SERVER_PORT", "9090");
        env::set_var("TICK_INTERVAL_MS", "250");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_config_rejects_unparseable_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("SERVER_PORT", "not-a-port");

        let result = Config::from_env();
        clear_env();

        match result {
            Err(AppError::InvalidConfig(msg)) => assert!(msg.contains("SERVER_PORT")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_zero_interval() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TICK_INTERVAL_MS", "0");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_config_rejects_non_utf8_value() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("SERVER_PORT", OsStr::from_bytes(b"80\xff"));

        let result = Config::from_env();
        clear_env();

        match result {
            Err(AppError::InvalidConfig(msg)) => assert!(msg.contains("SERVER_PORT")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
