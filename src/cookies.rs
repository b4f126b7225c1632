//! Session cookie propagation.
//!
//! Computes the `Cookie` header for a request from the `Set-Cookie` lines of
//! the previous response. Nothing is stored between calls: each `Set-Cookie`
//! line is parsed, checked once against the target URI and either serialized
//! or dropped.
//!
//! Attribute rules:
//! - `Expires` in the past drops the cookie
//! - `Domain` must equal the target host ignoring ASCII case, or start with
//!   `.` and occur anywhere inside the host (substring match, looser than RFC 6265 suffix
//!   matching)
//! - `Path` must be `/` or equal the target path
//! - `Secure` requires an `https` target
//!
//! A failing attribute drops the whole cookie. Other attributes (`HttpOnly`,
//! `Max-Age`, `SameSite`, ...) are ignored.

use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;

use crate::config::{ClientOptions, HEADER_COOKIE, HEADER_SET_COOKIE};
use crate::error_handling::ClientError;
use crate::message::{Request, Response, Uri};

/// Date layouts seen in `Expires` attributes, tried after RFC 2822.
const EXPIRES_FORMATS: &[&str] = &[
    "%a, %d-%b-%Y %H:%M:%S GMT",
    "%A, %d-%b-%y %H:%M:%S GMT",
    "%a, %d %b %Y %H:%M:%S",
    "%a %b %e %H:%M:%S %Y",
];

/// One parsed `Set-Cookie` line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SetCookie {
    name: String,
    value: String,
    /// Lower-cased attribute names with their trimmed values, in line order
    attributes: Vec<(String, Option<String>)>,
}

impl SetCookie {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split(';');
        let pair = parts.next()?;
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => (pair.trim(), ""),
        };
        if name.is_empty() {
            return None;
        }

        let attributes = parts
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.trim().to_ascii_lowercase(), Some(value.trim().to_string())),
                None => (token.to_ascii_lowercase(), None),
            })
            .collect();

        Some(SetCookie {
            name: name.to_string(),
            value: value.to_string(),
            attributes,
        })
    }

    /// Checks every attribute in order; the first failure rejects the cookie.
    fn accepted_for(&self, target: &Uri, now: DateTime<Utc>) -> bool {
        let host = target.host().unwrap_or_default();
        for (key, value) in &self.attributes {
            let value = value.as_deref().unwrap_or_default();
            let accepted = match key.as_str() {
                "expires" => match parse_cookie_date(value) {
                    Some(expires) => expires >= now,
                    None => {
                        debug!(
                            "Ignoring unparsable Expires '{}' on cookie {}",
                            value, self.name
                        );
                        true
                    }
                },
                "domain" => domain_matches(value, host),
                "path" => value == "/" || value == target.path(),
                "secure" => target.scheme() == Some("https"),
                _ => true,
            };
            if !accepted {
                debug!(
                    "Dropping cookie {}: {} attribute does not match {}",
                    self.name, key, target
                );
                return false;
            }
        }
        true
    }

    fn serialize(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Exact host match, or a dot-prefixed domain contained anywhere in the host.
fn domain_matches(domain: &str, host: &str) -> bool {
    let domain = domain.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();
    domain == host || (domain.starts_with('.') && host.contains(&domain))
}

/// Parses an `Expires` value into UTC.
pub fn parse_cookie_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    EXPIRES_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Builds a `Cookie` header value from `Set-Cookie` lines.
///
/// Cookies are keyed by name: a later line with the same name removes the
/// earlier entry before its own attributes are checked, so a rejected
/// duplicate also clears the accepted one. Returns `None` when no cookie
/// survives.
pub fn build_cookie_header<S: AsRef<str>>(
    set_cookie_lines: &[S],
    target: &Uri,
    now: DateTime<Utc>,
) -> Option<String> {
    let mut accepted: Vec<SetCookie> = Vec::new();

    for line in set_cookie_lines {
        let Some(cookie) = SetCookie::parse(line.as_ref()) else {
            continue;
        };
        accepted.retain(|existing| existing.name != cookie.name);
        if cookie.accepted_for(target, now) {
            accepted.push(cookie);
        }
    }

    if accepted.is_empty() {
        return None;
    }
    Some(
        accepted
            .iter()
            .map(SetCookie::serialize)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Computes the `Cookie` header for `target` from a prior response.
///
/// Returns `None` when cookies are disabled or nothing applies.
pub fn cookie_header_for(
    prior: &Response,
    target: &Request,
    options: &ClientOptions,
) -> Option<String> {
    if !options.use_cookies {
        return None;
    }
    let lines = prior.header(HEADER_SET_COOKIE);
    if lines.is_empty() {
        return None;
    }
    build_cookie_header(&lines, target.uri(), Utc::now())
}

/// Returns `request` with a `Cookie` header derived from `prior`.
///
/// The request is returned unchanged when no cookie applies; an empty
/// `Cookie` header is never attached.
///
/// # Errors
///
/// Returns `ClientError::InvalidHeader` if the assembled value cannot be
/// sent as a header.
pub fn apply_request_cookies(
    request: Request,
    prior: &Response,
    options: &ClientOptions,
) -> Result<Request, ClientError> {
    match cookie_header_for(prior, &request, options) {
        Some(header) => {
            debug!("Attaching cookies to {}: {}", request.uri(), header);
            request.with_header(HEADER_COOKIE, &header)
        }
        None => Ok(request),
    }
}
