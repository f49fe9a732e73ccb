//! HTTP request and response values stored on a tape

use std::fmt;

use bytes::Bytes;
use url::{ParseError, Url};

/// Header added by proxies on each hop
pub const VIA: &str = "Via";

/// Header marking a response that was served from a tape
pub const X_OKREPLAY: &str = "X-OkReplay";

/// Base that relative request URLs are resolved against
const RELATIVE_BASE: &str = "http://localhost/";

/// Recorded or incoming HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method (e.g., "GET", "POST")
    pub method: String,
    /// Full request URL
    pub url: String,
    /// Headers in wire order
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<Bytes>,
}

impl Request {
    /// Create a request without headers or body
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// First value of a header, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Remove every header whose name is in `names`
    #[must_use]
    pub fn without_headers<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        strip_headers(&mut self.headers, names);
        self
    }

    /// Body length in bytes (0 when absent)
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Bytes::len)
    }

    /// URL parsed as an absolute URL
    ///
    /// `None` for relative references and for URLs that fail to parse,
    /// including out-of-range ports.
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(self.url.trim()).ok()
    }

    /// Host component of the URL, lowercased, without userinfo or port
    pub fn host(&self) -> Option<String> {
        self.parsed_url()?.host_str().map(str::to_owned)
    }

    /// Explicit port, or the scheme's default port
    pub fn port(&self) -> Option<u16> {
        self.parsed_url()?.port_or_known_default()
    }

    /// URL path with dot segments removed, `/` when empty
    ///
    /// Relative references such as `/a/b?x=1` have a path too.
    pub fn path(&self) -> Option<String> {
        self.resolved_url().map(|url| url.path().to_owned())
    }

    /// Percent-decoded query parameters in URL order
    pub fn query_pairs(&self) -> Option<Vec<(String, String)>> {
        let url = self.resolved_url()?;
        Some(
            url.query_pairs()
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    fn resolved_url(&self) -> Option<Url> {
        match Url::parse(self.url.trim()) {
            Ok(url) => Some(url),
            Err(ParseError::RelativeUrlWithoutBase) => {
                Url::parse(RELATIVE_BASE).ok()?.join(self.url.trim()).ok()
            }
            Err(_) => None,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Recorded HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Headers in wire order
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Option<Bytes>,
}

impl Response {
    /// Create a response without headers or body
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// First value of a header, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Remove every header whose name is in `names`
    #[must_use]
    pub fn without_headers<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        strip_headers(&mut self.headers, names);
        self
    }

    /// Body length in bytes (0 when absent)
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Bytes::len)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

fn strip_headers<S: AsRef<str>>(headers: &mut Vec<(String, String)>, names: &[S]) {
    headers.retain(|(key, _)| !names.iter().any(|name| key.eq_ignore_ascii_case(name.as_ref())));
}
