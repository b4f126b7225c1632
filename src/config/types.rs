//! Configuration types.
//!
//! This module defines the client option set and the enums used by the CLI
//! for logging configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_CONNECTION_TIMEOUT_SECS, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Client options.
///
/// Only the recognized keys below are read; anything else in a deserialized
/// document is ignored. `transport_options` is handed to the transport as-is
/// and may override computed transport settings (see
/// [`build_transport_options`](crate::transport::build_transport_options)).
///
/// # Examples
///
/// ```
/// use wire_client::ClientOptions;
///
/// let options = ClientOptions {
///     max_redirects: 3,
///     use_cookies: false,
///     ..Default::default()
/// };
/// assert!(options.follow_redirects);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Connection establishment timeout in seconds
    pub connection_timeout: u64,

    /// Overall timeout per transport call in seconds
    pub timeout: u64,

    /// Let the transport follow redirects on its own
    pub follow_redirects: bool,

    /// Redirect budget for one top-level send
    pub max_redirects: usize,

    /// Verify the peer certificate on TLS connections
    pub ssl_verify_peer: bool,

    /// Ask the transport to negotiate and decode compressed bodies
    pub decode_content: bool,

    /// Propagate cookies from `Set-Cookie` responses
    pub use_cookies: bool,

    /// Raw transport-specific options
    pub transport_options: BTreeMap<String, serde_json::Value>,
}

impl ClientOptions {
    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Adds a passthrough option, replacing any previous value for `key`.
    pub fn with_transport_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.transport_options.insert(key.into(), value.into());
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT_SECS,
            timeout: DEFAULT_TIMEOUT_SECS,
            follow_redirects: true,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            ssl_verify_peer: true,
            decode_content: true,
            use_cookies: true,
            transport_options: BTreeMap::new(),
        }
    }
}
