/// HTTP status codes this server can emit.
///
/// Every code other than `Ok` is connection-fatal: the error responder
/// sends it with `Connection: close` and tears the socket down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 408 Request Timeout
    RequestTimeout,
    /// 413 Payload Too Large
    PayloadTooLarge,
    /// 414 URI Too Long
    UriTooLong,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::RequestTimeout => 408,
            StatusCode::PayloadTooLarge => 413,
            StatusCode::UriTooLong => 414,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard reason phrase.
    ///
    /// # Example
    ///
    /// ```
    /// # use pharos::http::response::StatusCode;
    /// assert_eq!(StatusCode::PayloadTooLarge.reason_phrase(), "Payload Too Large");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::RequestTimeout => "Request Timeout",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::UriTooLong => "URI Too Long",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// A complete HTTP response ready for serialization.
///
/// Responses are always `HTTP/1.1` with explicit `Content-Length` and
/// `Connection` headers, never chunked.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
    /// Rendered as `Connection: keep-alive` when true, `close` otherwise
    pub keep_alive: bool,
}

impl Response {
    /// Creates a 200 OK response.
    pub fn ok(body: impl Into<Vec<u8>>, keep_alive: bool) -> Self {
        Self {
            status: StatusCode::Ok,
            body: body.into(),
            keep_alive,
        }
    }

    /// Creates the error response for a protocol violation.
    ///
    /// The body is the numeric code plus reason phrase, and the connection
    /// is always marked for closure.
    pub fn error(status: StatusCode) -> Self {
        let body = format!("{} {}", status.as_u16(), status.reason_phrase());
        Self {
            status,
            body: body.into_bytes(),
            keep_alive: false,
        }
    }

    /// Serializes status line, headers, and body onto `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: {}\r\n\r\n",
            self.status.as_u16(),
            self.status.reason_phrase(),
            self.body.len(),
            if self.keep_alive { "keep-alive" } else { "close" },
        );
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(&self.body);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64 + self.body.len());
        self.write_to(&mut out);
        out
    }
}
