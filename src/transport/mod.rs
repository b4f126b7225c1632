//! Transport invocation.
//!
//! A transport performs exactly one network exchange (possibly following
//! redirects internally) and returns the raw wire bytes of the final response
//! together with a small amount of metadata. Decoding those bytes is the job
//! of [`parse_response`](crate::parse::parse_response).

mod options;
mod reqwest_transport;
mod wire;

use std::future::Future;

pub use options::{build_transport_options, BasicCredentials, TransportOptions};
pub use reqwest_transport::ReqwestTransport;
pub use wire::serialize_response;

use crate::error_handling::ClientError;
use crate::message::ProtocolVersion;

/// Metadata reported alongside the raw response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportInfo {
    /// Redirects the transport followed on its own
    pub redirect_count: usize,
    /// Byte offset where the body begins in `RawResponse::raw`
    pub header_size: usize,
}

/// Raw result of one transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Status line(s), headers and body exactly as received
    pub raw: Vec<u8>,
    pub info: TransportInfo,
}

/// A network backend capable of executing a single HTTP exchange.
pub trait Transport: Send + Sync {
    /// Whether this transport can speak `version`.
    fn supports_protocol(&self, version: ProtocolVersion) -> bool;

    /// Performs the exchange described by `options`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` on network, TLS or timeout failure.
    fn execute(
        &self,
        options: &TransportOptions,
    ) -> impl Future<Output = Result<RawResponse, ClientError>> + Send;
}
