use std::collections::HashMap;

use crate::http::kv::Params;

/// HTTP request methods accepted by the server.
///
/// Anything outside this set is rejected at parse time with
/// `405 Method Not Allowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data (urlencoded bodies are decoded)
    POST,
    /// HEAD - Like GET but clients ignore the body
    HEAD,
}

impl Method {
    /// Parses a method token, case-insensitively.
    pub fn from_token(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("GET") {
            Some(Method::GET)
        } else if s.eq_ignore_ascii_case("POST") {
            Some(Method::POST)
        } else if s.eq_ignore_ascii_case("HEAD") {
            Some(Method::HEAD)
        } else {
            None
        }
    }
}

/// HTTP protocol version of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

/// A fully parsed HTTP request.
///
/// Produced by one successful parse cycle and immutable afterwards. Header
/// keys are lower-cased; query, cookie, and form values are decoded by the
/// key-value decoder (no percent-decoding).
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, HEAD)
    pub method: Method,
    /// Protocol version from the request line
    pub version: Version,
    /// Raw target URI as received, query string included
    pub uri: String,
    /// Path portion of the URI (before the first `?`)
    pub path: String,
    /// Decoded query parameters
    pub query: Params,
    /// Headers with lower-cased keys
    pub headers: HashMap<String, String>,
    /// Decoded `Cookie` header pairs
    pub cookies: Params,
    /// Decoded urlencoded POST body pairs
    pub form: Params,
    /// Raw body bytes, exactly `Content-Length` long
    pub body: Vec<u8>,
    /// Whether the connection must close once the response is flushed
    pub close: bool,
    /// Whether the client sent `Expect: 100-continue`
    pub expect_continue: bool,
}

impl Request {
    /// Looks up a header by its lower-cased key.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}

/// Connection persistence rules for the two supported versions:
/// HTTP/1.1 stays open unless `Connection: close`, HTTP/1.0 closes
/// unless `Connection: keep-alive`.
pub fn close_after_response(version: Version, connection_header: Option<&str>) -> bool {
    match version {
        Version::Http11 => connection_header
            .map(|v| v.eq_ignore_ascii_case("close"))
            .unwrap_or(false),
        Version::Http10 => !connection_header
            .map(|v| v.eq_ignore_ascii_case("keep-alive"))
            .unwrap_or(false),
    }
}
