//! Error type definitions.
//!
//! This module defines the error values the request pipeline returns, the
//! field-less kinds used to branch on them, and the informational event types
//! tracked by [`ClientStats`](super::ClientStats).

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The options file could not be read.
    #[error("Options file error: {0}")]
    OptionsFileError(#[from] std::io::Error),

    /// The options file is not a valid options document.
    #[error("Options parse error: {0}")]
    OptionsParseError(#[from] serde_json::Error),
}

/// Categories of transport-level failures.
///
/// Derived from the underlying HTTP library error so callers can tell a DNS
/// or connect failure apart from a timeout without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportErrorKind {
    Builder,
    Redirect,
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Other,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Builder => "builder",
            TransportErrorKind::Redirect => "redirect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Request => "request",
            TransportErrorKind::Body => "body",
            TransportErrorKind::Decode => "decode",
            TransportErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the request pipeline.
///
/// None of these are retried internally; every variant reaches the caller of
/// [`HttpClient::send`](crate::HttpClient::send).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network, DNS, TLS or timeout failure inside the transport.
    #[error("Transport error: ({kind}) {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    /// The raw response could not be decoded.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The redirect counter reached the configured maximum.
    #[error("Redirection limit exceeded ({max} redirects)")]
    RedirectLimitExceeded { max: usize },

    /// A 3xx response did not carry a `Location` header.
    #[error("Redirect response {status} has no Location header")]
    MissingLocation { status: u16 },

    /// The requested HTTP version is unknown or not supported by the transport.
    #[error("Unsupported HTTP protocol version: {0}")]
    UnsupportedProtocolVersion(String),

    /// A URI could not be parsed or is not usable as a request target.
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    /// A transport option has a value of the wrong type.
    #[error("Invalid transport option '{key}': {value}")]
    InvalidOption { key: String, value: String },

    /// A header name or value is not valid on the wire.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Field-less discriminant of [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    Transport,
    MalformedResponse,
    RedirectLimitExceeded,
    MissingLocation,
    UnsupportedProtocolVersion,
    InvalidUri,
    InvalidOption,
    InvalidHeader,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            ClientError::RedirectLimitExceeded { .. } => ErrorKind::RedirectLimitExceeded,
            ClientError::MissingLocation { .. } => ErrorKind::MissingLocation,
            ClientError::UnsupportedProtocolVersion(_) => ErrorKind::UnsupportedProtocolVersion,
            ClientError::InvalidUri { .. } => ErrorKind::InvalidUri,
            ClientError::InvalidOption { .. } => ErrorKind::InvalidOption,
            ClientError::InvalidHeader { .. } => ErrorKind::InvalidHeader,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ClientError::MalformedResponse(message.into())
    }

    pub(crate) fn invalid_header(name: &str, reason: impl ToString) -> Self {
        ClientError::InvalidHeader {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_uri(uri: &str, reason: impl Into<String>) -> Self {
        ClientError::InvalidUri {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "Transport error",
            ErrorKind::MalformedResponse => "Malformed response",
            ErrorKind::RedirectLimitExceeded => "Redirect limit exceeded",
            ErrorKind::MissingLocation => "Missing Location header",
            ErrorKind::UnsupportedProtocolVersion => "Unsupported protocol version",
            ErrorKind::InvalidUri => "Invalid URI",
            ErrorKind::InvalidOption => "Invalid transport option",
            ErrorKind::InvalidHeader => "Invalid header",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notable pipeline events that are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// A response was parsed from raw transport output
    ResponseParsed,
    /// A 3xx response was followed by the client
    ClientRedirect,
    /// A redirect was followed inside the transport
    TransportRedirect,
    /// A `Cookie` header was attached from a prior response
    CookiesAttached,
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::ResponseParsed => "Responses parsed",
            InfoType::ClientRedirect => "Redirects followed by client",
            InfoType::TransportRedirect => "Redirects followed by transport",
            InfoType::CookiesAttached => "Cookie headers attached",
        }
    }
}

impl std::fmt::Display for InfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
