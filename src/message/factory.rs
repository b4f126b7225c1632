//! Construction capability for message values.

use super::body::Body;
use super::response::Response;
use super::uri::Uri;
use crate::error_handling::ClientError;

/// Creates the message values the pipeline hands back to callers.
///
/// The parser and redirect resolver only build messages through this trait,
/// so an application can change how empty responses, URIs and bodies are
/// produced (for example, to pre-populate headers) without touching the core.
pub trait MessageFactory: Send + Sync {
    fn create_response(&self) -> Response;

    fn create_uri(&self, uri: &str) -> Result<Uri, ClientError>;

    fn create_stream_from_string(&self, content: &[u8]) -> Body;
}

/// Factory producing the crate's own message types with their defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessageFactory;

impl MessageFactory for DefaultMessageFactory {
    fn create_response(&self) -> Response {
        Response::default()
    }

    fn create_uri(&self, uri: &str) -> Result<Uri, ClientError> {
        Uri::parse(uri)
    }

    fn create_stream_from_string(&self, content: &[u8]) -> Body {
        Body::from(content)
    }
}
