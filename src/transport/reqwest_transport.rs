//! reqwest-backed transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Proxy, Version};

use super::{serialize_response, RawResponse, Transport, TransportInfo, TransportOptions};
use crate::config::{DEFAULT_USER_AGENT, OPT_PROXY, OPT_USER_AGENT};
use crate::error_handling::ClientError;
use crate::message::{Method, ProtocolVersion};

/// Transport performing the exchange with `reqwest`.
///
/// A fresh `reqwest::Client` is built for every call, so no connection is
/// reused between calls. The final response is re-serialized into HTTP/1.x
/// framing; decompressed bodies lose their `Content-Encoding` and
/// `Content-Length` headers the same way `reqwest` drops them.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    user_agent: String,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Overrides the default User-Agent; the `user_agent` passthrough option
    /// still wins.
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn build_client(
        &self,
        options: &TransportOptions,
        redirects: Arc<AtomicUsize>,
    ) -> Result<Client, ClientError> {
        let follow = options.follow_redirects;
        let max = options.max_redirects;
        let policy = Policy::custom(move |attempt| {
            // previous() holds the original URL plus every hop already taken
            if !follow || attempt.previous().len() > max {
                attempt.stop()
            } else {
                redirects.fetch_add(1, Ordering::SeqCst);
                attempt.follow()
            }
        });

        let user_agent = options
            .extra_str(OPT_USER_AGENT)
            .unwrap_or(&self.user_agent)
            .to_string();

        let (gzip, brotli, deflate) = accepted_encodings(options.encoding.as_deref());

        let mut builder = ClientBuilder::new()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .redirect(policy)
            .danger_accept_invalid_certs(!options.verify_peer)
            .user_agent(user_agent)
            .gzip(gzip)
            .brotli(brotli)
            .deflate(deflate);

        match options.version {
            Some(ProtocolVersion::Http10) | Some(ProtocolVersion::Http11) => {
                builder = builder.http1_only();
            }
            Some(ProtocolVersion::Http2) if options.uri.scheme() == Some("http") => {
                builder = builder.http2_prior_knowledge();
            }
            _ => {}
        }

        if let Some(proxy) = options.extra_str(OPT_PROXY) {
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(builder.build()?)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn supports_protocol(&self, _version: ProtocolVersion) -> bool {
        true
    }

    async fn execute(&self, options: &TransportOptions) -> Result<RawResponse, ClientError> {
        let redirects = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(options, Arc::clone(&redirects))?;
        let url = options.uri.to_url()?;

        debug!("{} {}", options.method, url);

        let mut request = client.request(to_reqwest_method(options.method), url);
        if let Some(version) = options.version {
            request = request.version(to_reqwest_version(version));
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(credentials) = &options.basic_auth {
            request = request.basic_auth(&credentials.user, credentials.password.as_ref());
        }
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let version = version_label(response.version());
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?;

        let redirect_count = redirects.load(Ordering::SeqCst);
        debug!(
            "{} {} -> {} ({} bytes, {} transport redirects)",
            options.method,
            options.uri,
            status.as_u16(),
            body.len(),
            redirect_count
        );
        for (name, value) in &headers {
            trace!("< {}: {}", name, value);
        }

        let (raw, header_size) = serialize_response(
            version,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
            headers.iter().map(|(n, v)| (n.as_str(), v.as_str())),
            &body,
        );

        Ok(RawResponse {
            raw,
            info: TransportInfo {
                redirect_count,
                header_size,
            },
        })
    }
}

/// Maps an encoding list onto reqwest's (gzip, brotli, deflate) switches.
///
/// `None` disables decoding; an empty list enables every supported encoding.
fn accepted_encodings(encoding: Option<&str>) -> (bool, bool, bool) {
    match encoding {
        None => (false, false, false),
        Some(list) if list.trim().is_empty() => (true, true, true),
        Some(list) => {
            let mut switches = (false, false, false);
            for token in list.split(',').map(|t| t.trim().to_ascii_lowercase()) {
                let name = token.split(';').next().unwrap_or_default().trim().to_string();
                match name.as_str() {
                    "gzip" | "x-gzip" => switches.0 = true,
                    "br" => switches.1 = true,
                    "deflate" => switches.2 = true,
                    "*" => switches = (true, true, true),
                    _ => {}
                }
            }
            switches
        }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Connect => reqwest::Method::CONNECT,
        Method::Trace => reqwest::Method::TRACE,
    }
}

fn to_reqwest_version(version: ProtocolVersion) -> Version {
    match version {
        ProtocolVersion::Http10 => Version::HTTP_10,
        ProtocolVersion::Http11 => Version::HTTP_11,
        ProtocolVersion::Http2 => Version::HTTP_2,
    }
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_encodings() {
        assert_eq!(accepted_encodings(None), (false, false, false));
        assert_eq!(accepted_encodings(Some("")), (true, true, true));
        assert_eq!(accepted_encodings(Some("gzip")), (true, false, false));
        assert_eq!(
            accepted_encodings(Some("br;q=1.0, deflate;q=0.5")),
            (false, true, true)
        );
        assert_eq!(accepted_encodings(Some("identity")), (false, false, false));
        assert_eq!(accepted_encodings(Some("*")), (true, true, true));
    }

    #[test]
    fn test_version_labels() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }

    #[test]
    fn test_every_method_maps() {
        use strum::IntoEnumIterator;
        for method in Method::iter() {
            assert_eq!(to_reqwest_method(method).as_str(), method.as_ref());
        }
    }
}
