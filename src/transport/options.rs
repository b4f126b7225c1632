//! Transport option building.

use std::collections::BTreeMap;
use std::time::Duration;

use log::warn;
use serde_json::Value;

use super::Transport;
use crate::config::{
    ClientOptions, HEADER_ACCEPT_ENCODING, OPT_CONNECTION_TIMEOUT, OPT_ENCODING,
    OPT_FOLLOW_REDIRECTS, OPT_HTTP_VERSION, OPT_MAX_REDIRECTS, OPT_SSL_VERIFY_PEER, OPT_TIMEOUT,
    PROTECTED_TRANSPORT_KEYS,
};
use crate::error_handling::ClientError;
use crate::message::{Method, ProtocolVersion, Request, Uri};

/// Credentials taken from the userinfo of the request URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub user: String,
    pub password: Option<String>,
}

/// Everything a transport needs to perform one call.
///
/// Built by [`build_transport_options`]; transports never look at the
/// `Request` or `ClientOptions` directly.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportOptions {
    /// Target URI, userinfo removed
    pub uri: Uri,
    pub method: Method,
    /// `None` lets the transport negotiate
    pub version: Option<ProtocolVersion>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    /// Transport-level redirect following
    pub follow_redirects: bool,
    /// Transport-level redirect limit
    pub max_redirects: usize,
    pub verify_peer: bool,
    /// Encodings to negotiate and decode; `None` disables decoding
    pub encoding: Option<String>,
    /// One entry per header value, in request order
    pub headers: Vec<(String, String)>,
    pub basic_auth: Option<BasicCredentials>,
    /// Present only for non-empty bodies
    pub body: Option<Vec<u8>>,
    /// Passthrough keys no generic field covers
    pub extra: BTreeMap<String, Value>,
}

impl TransportOptions {
    /// Renders the headers as `name: value` lines.
    pub fn header_lines(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect()
    }

    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Computes the transport options for `request`.
///
/// `remaining_redirects` caps the transport-level redirect limit so that
/// redirects followed inside the transport and by the client together never
/// exceed `max_redirects`. Passthrough entries of
/// `options.transport_options` override computed values, except `url` and
/// `method`, which always come from the request.
///
/// # Errors
///
/// - `ClientError::UnsupportedProtocolVersion` if the requested version is
///   not supported by `transport`
/// - `ClientError::InvalidOption` if a passthrough value has the wrong type
/// - `ClientError::InvalidUri` if the request URI is not absolute
pub fn build_transport_options<T>(
    request: &Request,
    options: &ClientOptions,
    remaining_redirects: usize,
    transport: &T,
) -> Result<TransportOptions, ClientError>
where
    T: Transport + ?Sized,
{
    let source = request.uri();
    if !source.is_absolute() {
        return Err(ClientError::invalid_uri(
            &source.to_string(),
            "request URI must be absolute",
        ));
    }

    let basic_auth = source.user().map(|user| BasicCredentials {
        user: user.to_string(),
        password: source.password().map(str::to_string),
    });

    let encoding = (options.decode_content && request.has_header(HEADER_ACCEPT_ENCODING))
        .then(|| request.header_line(HEADER_ACCEPT_ENCODING));

    let body = (!request.body().is_empty()).then(|| request.body().as_bytes().to_vec());

    let mut built = TransportOptions {
        uri: source.clone().with_userinfo(None, None),
        method: request.method(),
        version: request.protocol_version(),
        connect_timeout: options.connect_timeout_duration(),
        timeout: options.timeout_duration(),
        follow_redirects: options.follow_redirects,
        max_redirects: options.max_redirects.min(remaining_redirects),
        verify_peer: options.ssl_verify_peer,
        encoding,
        headers: request
            .headers()
            .pairs()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
        basic_auth,
        body,
        extra: BTreeMap::new(),
    };

    for (key, value) in &options.transport_options {
        apply_passthrough(&mut built, key, value)?;
    }
    built.max_redirects = built.max_redirects.min(remaining_redirects);

    if let Some(version) = built.version {
        if !transport.supports_protocol(version) {
            return Err(ClientError::UnsupportedProtocolVersion(
                version.to_string(),
            ));
        }
    }

    Ok(built)
}

fn apply_passthrough(
    built: &mut TransportOptions,
    key: &str,
    value: &Value,
) -> Result<(), ClientError> {
    match key {
        k if PROTECTED_TRANSPORT_KEYS.contains(&k) => {
            warn!("Ignoring transport option '{}': derived from the request", k);
        }
        OPT_CONNECTION_TIMEOUT => built.connect_timeout = Duration::from_secs(as_u64(key, value)?),
        OPT_TIMEOUT => built.timeout = Duration::from_secs(as_u64(key, value)?),
        OPT_FOLLOW_REDIRECTS => built.follow_redirects = as_bool(key, value)?,
        OPT_MAX_REDIRECTS => built.max_redirects = as_u64(key, value)? as usize,
        OPT_SSL_VERIFY_PEER => built.verify_peer = as_bool(key, value)?,
        OPT_ENCODING => {
            built.encoding = match value {
                Value::Null | Value::Bool(false) => None,
                Value::Bool(true) => Some(String::new()),
                Value::String(s) => Some(s.clone()),
                other => return Err(invalid(key, other)),
            }
        }
        OPT_HTTP_VERSION => {
            built.version = match value {
                Value::Null => None,
                Value::String(s) => Some(s.parse()?),
                Value::Number(n) => Some(n.to_string().parse()?),
                other => return Err(invalid(key, other)),
            }
        }
        _ => {
            built.extra.insert(key.to_string(), value.clone());
        }
    }
    Ok(())
}

fn as_u64(key: &str, value: &Value) -> Result<u64, ClientError> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| invalid(key, value)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid(key, value)),
        _ => Err(invalid(key, value)),
    }
}

fn as_bool(key: &str, value: &Value) -> Result<bool, ClientError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_u64().is_some_and(|n| n != 0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            _ => Err(invalid(key, value)),
        },
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &Value) -> ClientError {
    ClientError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
    }
}
