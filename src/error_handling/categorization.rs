//! Transport error categorization.

use super::types::{ClientError, TransportErrorKind};

/// Categorizes a `reqwest::Error` into a `TransportErrorKind`.
///
/// Timeouts are checked before connect/request so that a connect timeout is
/// reported as a timeout.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_builder() {
        TransportErrorKind::Builder
    } else if error.is_redirect() {
        TransportErrorKind::Redirect
    } else if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_request() {
        TransportErrorKind::Request
    } else if error.is_body() {
        TransportErrorKind::Body
    } else if error.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Other
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        let kind = categorize_reqwest_error(&error);
        // The Display of reqwest::Error omits the cause chain
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ClientError::Transport { kind, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_categorize_builder_error() {
        // A URL without a host cannot be turned into a request
        let error = reqwest::Client::new()
            .get("http://")
            .send()
            .await
            .expect_err("request without host must fail");
        assert_eq!(
            categorize_reqwest_error(&error),
            TransportErrorKind::Builder
        );
    }

    #[tokio::test]
    async fn test_categorize_connect_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let error = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("connection must be refused");
        let kind = categorize_reqwest_error(&error);
        assert!(
            kind == TransportErrorKind::Connect || kind == TransportErrorKind::Request,
            "unexpected kind {kind}"
        );

        let converted = ClientError::from(error);
        match converted {
            ClientError::Transport { message, .. } => assert!(!message.is_empty()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_kind_display() {
        assert_eq!(TransportErrorKind::Timeout.to_string(), "timeout");
        assert_eq!(TransportErrorKind::Connect.to_string(), "connect");
    }
}
