//! The request pipeline.
//!
//! [`HttpClient::send`] runs one request to completion:
//! 1. build transport options and invoke the transport
//! 2. parse the raw bytes into a `Response`
//! 3. hand 3xx responses to the redirect resolver, which may produce a new
//!    request (with cookies from the redirect response attached)
//! 4. repeat until a response is returned or an error occurs

use std::sync::Arc;

use log::{debug, warn};

use crate::config::{ClientOptions, HEADER_COOKIE};
use crate::error_handling::{ClientError, ClientStats, InfoType};
use crate::message::{DefaultMessageFactory, MessageFactory, Request, Response};
use crate::parse::parse_response;
use crate::redirects::{maybe_redirect, RedirectDecision, RedirectState};
use crate::transport::{build_transport_options, Transport};

/// An HTTP client over a pluggable [`Transport`].
///
/// The client holds no per-request state; every `send` call gets its own
/// redirect counter, so a single client can be shared across tasks (wrap it
/// in an `Arc`).
#[derive(Debug)]
pub struct HttpClient<T, F = DefaultMessageFactory> {
    transport: T,
    factory: F,
    options: ClientOptions,
    stats: Arc<ClientStats>,
}

impl<T: Transport> HttpClient<T> {
    /// Creates a client producing the crate's own message types.
    pub fn new(transport: T, options: ClientOptions) -> Self {
        Self::with_factory(transport, DefaultMessageFactory, options)
    }
}

impl<T, F> HttpClient<T, F>
where
    T: Transport,
    F: MessageFactory,
{
    pub fn with_factory(transport: T, factory: F, options: ClientOptions) -> Self {
        Self {
            transport,
            factory,
            options,
            stats: Arc::new(ClientStats::new()),
        }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Shared counters for errors and pipeline events.
    pub fn stats(&self) -> Arc<ClientStats> {
        Arc::clone(&self.stats)
    }

    /// Sends `request`, following redirects as configured.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`]; nothing is retried.
    pub async fn send(&self, request: Request) -> Result<Response, ClientError> {
        let result = self.follow(request).await;
        if let Err(e) = &result {
            self.stats.increment_error(e.kind());
            warn!("Request failed: {}", e);
        }
        result
    }

    /// Performs a single transport call without client-level redirect
    /// handling.
    ///
    /// # Errors
    ///
    /// Transport, option, version and parse errors.
    pub async fn invoke(&self, request: &Request) -> Result<Response, ClientError> {
        let (response, _) = self.exchange(request, self.options.max_redirects).await?;
        Ok(response)
    }

    async fn follow(&self, mut request: Request) -> Result<Response, ClientError> {
        let mut state = RedirectState::new();

        loop {
            let remaining = state.remaining(self.options.max_redirects);
            let (response, transport_redirects) = self.exchange(&request, remaining).await?;
            if transport_redirects > 0 {
                state.record_transport_redirects(transport_redirects);
                self.stats
                    .add_info(InfoType::TransportRedirect, transport_redirects);
            }

            match maybe_redirect(&request, &response, &self.options, &mut state, &self.factory)? {
                RedirectDecision::Direct => return Ok(response),
                RedirectDecision::Follow(next) => {
                    self.stats.increment_info(InfoType::ClientRedirect);
                    if next.header(HEADER_COOKIE) != request.header(HEADER_COOKIE) {
                        self.stats.increment_info(InfoType::CookiesAttached);
                    }
                    request = next;
                }
            }
        }
    }

    async fn exchange(
        &self,
        request: &Request,
        remaining_redirects: usize,
    ) -> Result<(Response, usize), ClientError> {
        let options =
            build_transport_options(request, &self.options, remaining_redirects, &self.transport)?;
        let raw = self.transport.execute(&options).await?;
        let response = parse_response(&self.factory, &raw.raw, raw.info.header_size)?;
        self.stats.increment_info(InfoType::ResponseParsed);
        debug!(
            "{} {} -> {} {}",
            request.method(),
            options.uri,
            response.status_code(),
            response.reason_phrase()
        );
        Ok((response, raw.info.redirect_count))
    }
}
