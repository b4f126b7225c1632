//! Request value type.

use std::fmt;
use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::body::Body;
use super::headers::Headers;
use super::uri::Uri;
use crate::error_handling::ClientError;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Connect,
    Trace,
}

/// HTTP protocol version a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    Http10,
    Http11,
    Http2,
}

impl ProtocolVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::Http10 => "1.0",
            ProtocolVersion::Http11 => "1.1",
            ProtocolVersion::Http2 => "2.0",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" => Ok(ProtocolVersion::Http10),
            "1.1" => Ok(ProtocolVersion::Http11),
            "2" | "2.0" => Ok(ProtocolVersion::Http2),
            other => Err(ClientError::UnsupportedProtocolVersion(other.to_string())),
        }
    }
}

/// An immutable HTTP request.
///
/// Every `with_*` method consumes the request and returns the derived value;
/// the pipeline never mutates a request it was handed.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: Headers,
    body: Body,
    protocol_version: Option<ProtocolVersion>,
}

impl Request {
    pub fn new(method: Method, uri: Uri) -> Self {
        Request {
            method,
            uri,
            headers: Headers::new(),
            body: Body::empty(),
            protocol_version: None,
        }
    }

    /// Builds a request from a method and a URI string.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUri` if `uri` does not parse.
    pub fn parse(method: Method, uri: &str) -> Result<Self, ClientError> {
        Ok(Request::new(method, Uri::parse(uri)?))
    }

    pub fn get(uri: &str) -> Result<Self, ClientError> {
        Request::parse(Method::Get, uri)
    }

    pub fn post(uri: &str, body: impl Into<Body>) -> Result<Self, ClientError> {
        Ok(Request::parse(Method::Post, uri)?.with_body(body))
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Vec<String> {
        self.headers.get(name)
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn header_line(&self, name: &str) -> String {
        self.headers.line(name)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn protocol_version(&self) -> Option<ProtocolVersion> {
        self.protocol_version
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Replaces all values of `name`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidHeader` if `name` or `value` is not valid
    /// on the wire.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        self.headers.set(name, value)?;
        Ok(self)
    }

    /// Adds a value to `name`, keeping existing values.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidHeader` if `name` or `value` is not valid
    /// on the wire.
    pub fn with_added_header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        self.headers.append(name, value)?;
        Ok(self)
    }

    pub fn without_header(mut self, name: &str) -> Self {
        self.headers.remove(name);
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_protocol_version(mut self, version: Option<ProtocolVersion>) -> Self {
        self.protocol_version = version;
        self
    }
}
