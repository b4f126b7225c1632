//! Configuration constants.
//!
//! Defaults for every recognized client option, plus the header names and
//! passthrough keys the pipeline looks at.

/// Connection establishment timeout in seconds
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 3;
/// Overall wall-clock timeout per transport call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Maximum number of redirects followed for one top-level send
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Default User-Agent string sent by the reqwest-backed transport.
pub const DEFAULT_USER_AGENT: &str = concat!("wire_client/", env!("CARGO_PKG_VERSION"));

// Header names the pipeline reads or writes
pub const HEADER_LOCATION: &str = "Location";
pub const HEADER_SET_COOKIE: &str = "Set-Cookie";
pub const HEADER_COOKIE: &str = "Cookie";
pub const HEADER_ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// Passthrough keys understood by every transport.
// Values supplied under these keys override the computed option.
pub const OPT_CONNECTION_TIMEOUT: &str = "connection_timeout";
pub const OPT_TIMEOUT: &str = "timeout";
pub const OPT_FOLLOW_REDIRECTS: &str = "follow_redirects";
pub const OPT_MAX_REDIRECTS: &str = "max_redirects";
pub const OPT_SSL_VERIFY_PEER: &str = "ssl_verify_peer";
pub const OPT_ENCODING: &str = "encoding";
pub const OPT_HTTP_VERSION: &str = "http_version";

/// Keys derived from the request itself; never taken from the passthrough map.
pub const PROTECTED_TRANSPORT_KEYS: &[&str] = &["url", "method"];

// Passthrough keys specific to the reqwest-backed transport
pub const OPT_USER_AGENT: &str = "user_agent";
pub const OPT_PROXY: &str = "proxy";
