//! Server configuration read from the environment.
//!
//! Every setting has a default matching the development server
//! (`127.0.0.1:8000` with auto-reload on); environment variables override
//! them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::AppError;

/// Default listen address.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;
/// Auto-reload is on unless disabled.
pub const DEFAULT_RELOAD: bool = true;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address (`HOST`).
    pub host: IpAddr,
    /// Listen port (`PORT`).
    pub port: u16,
    /// Run under the reload supervisor (`RELOAD`).
    pub reload: bool,
    /// Extra directories whose changes restart the server (`RELOAD_DIRS`).
    pub reload_dirs: Vec<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            reload: DEFAULT_RELOAD,
            reload_dirs: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("HOST must be an IP address: {e}")))?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => defaults.port,
        };

        let reload = match lookup("RELOAD") {
            Some(value) => parse_flag("RELOAD", &value)?,
            None => defaults.reload,
        };

        let reload_dirs = lookup("RELOAD_DIRS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|dir| !dir.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            reload,
            reload_dirs,
        })
    }

    /// The socket address the server listens on.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Log output format (`LOG_FORMAT`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable lines.
    Text,
}

impl LogFormat {
    /// Read the log format from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for values other than `json` or `text`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the log format through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for values other than `json` or `text`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("LOG_FORMAT") {
            None => Ok(Self::default()),
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "json" => Ok(Self::Json),
                "text" => Ok(Self::Text),
                other => Err(AppError::Config(format!(
                    "LOG_FORMAT must be 'json' or 'text', got {other:?}"
                ))),
            },
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{key} must be a boolean flag, got {other:?}"
        ))),
    }
}
