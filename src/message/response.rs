//! Response value type.

use super::body::Body;
use super::headers::Headers;
use crate::error_handling::ClientError;

/// An immutable HTTP response.
///
/// Built incrementally by the response parser through the `with_*`
/// derivations: status line first, then headers, then the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    protocol_version: String,
    headers: Headers,
    body: Body,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Response {
            status,
            protocol_version: "1.1".to_string(),
            headers: Headers::new(),
            body: Body::empty(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Reason phrase implied by the status code, empty for unknown codes.
    pub fn reason_phrase(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
    }

    pub fn is_redirection(&self) -> bool {
        (300..400).contains(&self.status)
    }

    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
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

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
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

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Response::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_phrase_from_code() {
        assert_eq!(Response::new(404).reason_phrase(), "Not Found");
        assert_eq!(Response::new(302).reason_phrase(), "Found");
        assert_eq!(Response::new(599).reason_phrase(), "");
    }

    #[test]
    fn test_redirection_range() {
        assert!(!Response::new(299).is_redirection());
        assert!(Response::new(300).is_redirection());
        assert!(Response::new(399).is_redirection());
        assert!(!Response::new(400).is_redirection());
    }

    #[test]
    fn test_incremental_build() {
        let response = Response::default()
            .with_status(201)
            .with_protocol_version("1.0")
            .with_added_header("Set-Cookie", "a=1")
            .and_then(|r| r.with_added_header("set-cookie", "b=2"))
            .expect("valid headers")
            .with_body("created");
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.protocol_version(), "1.0");
        assert_eq!(response.header("SET-COOKIE").len(), 2);
        assert_eq!(response.body().text(), "created");
    }
}
