//! Message model: requests, responses, URIs, headers and bodies.
//!
//! All values are immutable from the pipeline's point of view; changes go
//! through `with_*` methods that return a new value.

mod body;
mod factory;
mod headers;
mod request;
mod response;
mod uri;

pub use body::Body;
pub use factory::{DefaultMessageFactory, MessageFactory};
pub use headers::Headers;
pub use request::{Method, ProtocolVersion, Request};
pub use response::Response;
pub use uri::Uri;
