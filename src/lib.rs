//! wire_client library: an HTTP client that decodes raw wire responses
//!
//! The client drives a pluggable [`Transport`] that returns the raw bytes of a
//! response, parses them into immutable [`Response`] values, follows redirects
//! itself (including redirects the transport already followed, counted
//! against one budget) and carries cookies across redirect hops.
//!
//! # Example
//!
//! ```no_run
//! use wire_client::{ClientOptions, HttpClient, Request, ReqwestTransport};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(ReqwestTransport::new(), ClientOptions::default());
//!
//! let request = Request::get("https://example.org/")?.with_header("Accept", "text/html")?;
//! let response = client.send(request).await?;
//! println!("{} {}", response.status_code(), response.reason_phrase());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! `ReqwestTransport` requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call the client from within an async context.

pub mod auth;
mod client;
pub mod config;
pub mod cookies;
pub mod error_handling;
pub mod initialization;
pub mod message;
pub mod parse;
pub mod redirects;
pub mod transport;

// Re-export public API
pub use client::HttpClient;
pub use config::{ClientOptions, LogFormat, LogLevel};
pub use error_handling::{ClientError, ClientStats, ErrorKind, InfoType};
pub use message::{
    Body, DefaultMessageFactory, Headers, MessageFactory, Method, ProtocolVersion, Request,
    Response, Uri,
};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportInfo, TransportOptions};
