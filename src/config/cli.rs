//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::auth;
use crate::config::constants::OPT_USER_AGENT;
use crate::config::types::{ClientOptions, LogFormat, LogLevel};
use crate::error_handling::ClientError;
use crate::message::{Method, Request};

/// Command-line options for the `wire_client` binary.
///
/// # Examples
///
/// ```bash
/// # Fetch a page, printing the status line and headers
/// wire_client https://example.org/ -i
///
/// # POST a form without following redirects
/// wire_client https://example.org/login -X POST -d 'user=alice' --no-follow
///
/// # Start from an options file, override one setting
/// wire_client https://example.org/ --options client.json --max-redirects 2
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "wire_client",
    about = "Sends one HTTP request, following redirects and session cookies."
)]
pub struct Cli {
    /// Absolute URL to request
    pub url: String,

    /// Request method
    #[arg(short = 'X', long = "request", default_value = "GET")]
    pub method: String,

    /// Request header as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(short = 'd', long = "data")]
    pub data: Option<String>,

    /// HTTP version: 1.0|1.1|2.0
    #[arg(long)]
    pub http_version: Option<String>,

    /// JSON options file (see `ClientOptions`)
    #[arg(long, value_parser)]
    pub options: Option<PathBuf>,

    /// Do not follow redirects
    #[arg(long)]
    pub no_follow: bool,

    /// Redirect budget for the request
    #[arg(long)]
    pub max_redirects: Option<usize>,

    /// Skip TLS peer verification
    #[arg(short = 'k', long)]
    pub insecure: bool,

    /// Overall timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Connection timeout in seconds
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Basic auth credentials as USER[:PASSWORD]
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// HTTP User-Agent header value
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Print the status line and response headers before the body
    #[arg(short = 'i', long)]
    pub include: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Applies the command-line overrides on top of `base`.
    pub fn client_options(&self, base: ClientOptions) -> ClientOptions {
        let mut options = base;
        if self.no_follow {
            options.follow_redirects = false;
        }
        if let Some(max) = self.max_redirects {
            options.max_redirects = max;
        }
        if self.insecure {
            options.ssl_verify_peer = false;
        }
        if let Some(timeout) = self.timeout {
            options.timeout = timeout;
        }
        if let Some(timeout) = self.connect_timeout {
            options.connection_timeout = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            options = options.with_transport_option(OPT_USER_AGENT, user_agent.clone());
        }
        options
    }

    /// Builds the request described by the command line.
    ///
    /// # Errors
    ///
    /// `InvalidUri` for a bad URL, `InvalidOption` for an unknown method or a
    /// header without a colon, `InvalidHeader` for a header name or value that
    /// is not valid on the wire, `UnsupportedProtocolVersion` for a bad
    /// `--http-version`.
    pub fn build_request(&self) -> Result<Request, ClientError> {
        let method: Method = self.method.parse().map_err(|_| ClientError::InvalidOption {
            key: "method".to_string(),
            value: self.method.clone(),
        })?;

        let mut request = Request::parse(method, &self.url)?;

        for header in &self.headers {
            let (name, value) = header
                .split_once(':')
                .filter(|(name, _)| !name.trim().is_empty())
                .ok_or_else(|| ClientError::InvalidOption {
                    key: "header".to_string(),
                    value: header.clone(),
                })?;
            request = request.with_added_header(name.trim(), value.trim())?;
        }

        if let Some(data) = &self.data {
            request = request.with_body(data.as_str());
        }

        if let Some(version) = &self.http_version {
            request = request.with_protocol_version(Some(version.parse()?));
        }

        if let Some(user) = &self.user {
            let (user, password) = match user.split_once(':') {
                Some((user, password)) => (user, Some(password)),
                None => (user.as_str(), None),
            };
            request = auth::basic(request, user, password)?;
        }

        Ok(request)
    }
}
