//! HTTP redirect resolution.
//!
//! This module decides whether a response is followed, tracks the per-send
//! redirect budget, and resolves `Location` values against the URI of the
//! request that produced the redirect.

use log::debug;

use crate::config::{ClientOptions, HEADER_LOCATION};
use crate::cookies::apply_request_cookies;
use crate::error_handling::ClientError;
use crate::message::{MessageFactory, Request, Response, Uri};

/// Redirects followed during one top-level send.
///
/// Created fresh by every [`HttpClient::send`](crate::HttpClient::send) call
/// and threaded through its loop, so concurrent sends on one client never
/// share a counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedirectState {
    count: usize,
}

impl RedirectState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Redirects still available under `max`.
    pub fn remaining(&self, max: usize) -> usize {
        max.saturating_sub(self.count)
    }

    /// Adds redirects the transport already followed on its own.
    pub fn record_transport_redirects(&mut self, followed: usize) {
        self.count = self.count.saturating_add(followed);
    }
}

/// Outcome of inspecting a response.
#[derive(Debug, Clone, PartialEq)]
pub enum RedirectDecision {
    /// Hand the response to the caller
    Direct,
    /// Send this request next
    Follow(Request),
}

/// Decides whether `response` is a redirect to follow.
///
/// Responses outside `[300, 400)`, or any response when `follow_redirects`
/// is off, are `Direct`. Otherwise the budget is checked before the
/// `Location` header, the counter is incremented and the follow-up request
/// keeps the original method and body. With `use_cookies` on, cookies set by
/// the redirect response are attached to the follow-up request.
///
/// # Errors
///
/// - `ClientError::RedirectLimitExceeded` if `state` already reached
///   `max_redirects`
/// - `ClientError::MissingLocation` if the response has no usable `Location`
/// - `ClientError::InvalidUri` if the `Location` value cannot be parsed or
///   resolved
pub fn maybe_redirect<F>(
    request: &Request,
    response: &Response,
    options: &ClientOptions,
    state: &mut RedirectState,
    factory: &F,
) -> Result<RedirectDecision, ClientError>
where
    F: MessageFactory + ?Sized,
{
    if !response.is_redirection() || !options.follow_redirects {
        return Ok(RedirectDecision::Direct);
    }

    if state.count >= options.max_redirects {
        return Err(ClientError::RedirectLimitExceeded {
            max: options.max_redirects,
        });
    }

    let location = response
        .headers()
        .first(HEADER_LOCATION)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ClientError::MissingLocation {
            status: response.status_code(),
        })?;

    state.count += 1;

    let reference = factory.create_uri(&location)?;
    let target = resolve_location(request.uri(), &reference)?;
    debug!(
        "Redirect {} ({}): {} -> {}",
        state.count,
        response.status_code(),
        request.uri(),
        target
    );

    let mut next = request.clone().with_uri(target);
    if options.use_cookies {
        next = apply_request_cookies(next, response, options)?;
    }
    Ok(RedirectDecision::Follow(next))
}

/// Resolves a `Location` reference against the URI of the original request.
///
/// Path and query come from joining `location` onto `base` with
/// [`url::Url::join`], which merges relative paths and removes dot segments.
/// Every other component is taken from `location` when present and otherwise
/// inherited from `base`: scheme, host, user and password, port and fragment.
///
/// # Errors
///
/// Returns `ClientError::InvalidUri` when `base` is not absolute or the joined
/// reference is rejected by the `url` crate.
pub fn resolve_location(base: &Uri, location: &Uri) -> Result<Uri, ClientError> {
    let reference = location.to_string();
    let joined = base
        .to_url()?
        .join(&reference)
        .map_err(|e| ClientError::invalid_uri(&reference, e.to_string()))?;

    let (user, password) = match location.user() {
        Some(user) => (Some(user), location.password()),
        None => (base.user(), base.password()),
    };

    Ok(Uri::default()
        .with_scheme(location.scheme().or(base.scheme()))
        .with_userinfo(user, password)
        .with_host(location.host().or(base.host()))
        .with_port(location.port().or(base.port()))
        .with_path(Some(joined.path()))
        .with_query(joined.query())
        .with_fragment(location.fragment().or(base.fragment())))
}
