//! URI references with independently optional components.
//!
//! `url::Url` only represents absolute URLs and fills in defaults (a `/` path,
//! the scheme's default port), which hides whether a `Location` header
//! actually specified a component. `Uri` keeps every component optional so a
//! relative reference can be merged over a base component by component, and
//! converts to `url::Url` once the reference is absolute.

use std::fmt;

use crate::error_handling::ClientError;

/// A URI or relative reference.
///
/// Scheme and host are normalized to lower case; everything else is kept as
/// written (percent-encoding included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uri {
    scheme: Option<String>,
    user: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

impl Uri {
    /// Parses an absolute URI or a relative reference (RFC 3986, appendix B).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUri` for a non-numeric or out-of-range
    /// port, or an unterminated IPv6 literal.
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let input = input.trim();
        let mut uri = Uri::default();

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        uri.fragment = fragment.map(str::to_string);

        let (mut rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };
        uri.query = query.map(str::to_string);

        if let Some(colon) = rest.find(':') {
            let candidate = &rest[..colon];
            if !candidate.contains('/') && is_scheme(candidate) {
                uri.scheme = Some(candidate.to_ascii_lowercase());
                rest = &rest[colon + 1..];
            }
        }

        if let Some(after_slashes) = rest.strip_prefix("//") {
            let end = after_slashes.find('/').unwrap_or(after_slashes.len());
            let authority = &after_slashes[..end];
            rest = &after_slashes[end..];
            uri.parse_authority(authority, input)?;
        }

        if !rest.is_empty() {
            uri.path = Some(rest.to_string());
        }

        Ok(uri)
    }

    fn parse_authority(&mut self, authority: &str, input: &str) -> Result<(), ClientError> {
        let host_port = match authority.rsplit_once('@') {
            Some((userinfo, host_port)) => {
                match userinfo.split_once(':') {
                    Some((user, password)) => {
                        self.user = Some(user.to_string());
                        self.password = Some(password.to_string());
                    }
                    None => self.user = Some(userinfo.to_string()),
                }
                host_port
            }
            None => authority,
        };

        let (host, port) = if host_port.starts_with('[') {
            let close = host_port
                .find(']')
                .ok_or_else(|| ClientError::invalid_uri(input, "unterminated IPv6 literal"))?;
            let after = &host_port[close + 1..];
            let port = match after.strip_prefix(':') {
                Some(port) => Some(port),
                None if after.is_empty() => None,
                None => return Err(ClientError::invalid_uri(input, "garbage after IPv6 literal")),
            };
            (&host_port[..=close], port)
        } else {
            match host_port.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };

        self.host = Some(host.to_ascii_lowercase());
        self.port = match port {
            Some("") | None => None,
            Some(port) => Some(
                port.parse::<u16>()
                    .map_err(|_| ClientError::invalid_uri(input, format!("invalid port '{port}'")))?,
            ),
        };
        Ok(())
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// `user` or `user:password`, as it appears before `@`.
    pub fn userinfo(&self) -> Option<String> {
        let user = self.user.as_deref()?;
        Some(match self.password.as_deref() {
            Some(password) => format!("{user}:{password}"),
            None => user.to_string(),
        })
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The path, or `""` when the reference has none.
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some() && self.host.is_some()
    }

    pub fn with_scheme(mut self, scheme: Option<&str>) -> Self {
        self.scheme = scheme.map(str::to_ascii_lowercase);
        self
    }

    pub fn with_userinfo(mut self, user: Option<&str>, password: Option<&str>) -> Self {
        self.user = user.map(str::to_string);
        self.password = user.and(password).map(str::to_string);
        self
    }

    pub fn with_host(mut self, host: Option<&str>) -> Self {
        self.host = host.map(str::to_ascii_lowercase);
        self
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn with_path(mut self, path: Option<&str>) -> Self {
        self.path = path.filter(|p| !p.is_empty()).map(str::to_string);
        self
    }

    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(str::to_string);
        self
    }

    pub fn with_fragment(mut self, fragment: Option<&str>) -> Self {
        self.fragment = fragment.map(str::to_string);
        self
    }

    /// Converts an absolute URI into a `url::Url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUri` when scheme or host is missing or the
    /// `url` crate rejects the result.
    pub fn to_url(&self) -> Result<url::Url, ClientError> {
        let rendered = self.to_string();
        if !self.is_absolute() {
            return Err(ClientError::invalid_uri(
                &rendered,
                "scheme and host are required",
            ));
        }
        url::Url::parse(&rendered).map_err(|e| ClientError::invalid_uri(&rendered, e.to_string()))
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        if let Some(host) = &self.host {
            f.write_str("//")?;
            if let Some(userinfo) = self.userinfo() {
                write!(f, "{userinfo}@")?;
            }
            f.write_str(host)?;
            if let Some(port) = self.port {
                write!(f, ":{port}")?;
            }
            if let Some(path) = &self.path {
                if !path.starts_with('/') {
                    f.write_str("/")?;
                }
            }
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Uri {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}
