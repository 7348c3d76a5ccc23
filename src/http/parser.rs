use std::collections::HashMap;

use crate::config::Config;
use crate::http::kv;
use crate::http::request::{Method, Request, Version, close_after_response};
use crate::http::response::StatusCode;

/// Result of one parse attempt over a connection's unconsumed bytes.
#[derive(Debug)]
pub enum ParseOutcome {
    /// A full request was parsed; the second field is how many bytes of the
    /// input it consumed (header block plus body).
    Complete(Request, usize),
    /// The buffer does not yet hold a full request; read more and retry.
    Incomplete,
    /// Protocol violation. Terminal for the connection.
    Invalid(StatusCode),
}

/// Incrementally parses one HTTP request from `buf`.
///
/// `buf` must start at the connection's cursor (the first unconsumed byte).
/// `scanned` is the resume position for the header-terminator scan: the
/// parser only ever scans forward from it, so feeding the same growing
/// buffer across many partial reads stays amortized linear. The caller
/// resets it to zero whenever consumed bytes are dropped from the front.
///
/// On `Complete` the caller advances its cursor by the consumed count;
/// `Incomplete` consumes nothing, and `Invalid` ends the connection.
pub fn parse(buf: &[u8], scanned: &mut usize, cfg: &Config) -> ParseOutcome {
    // Header terminator scan, resuming 3 bytes back in case the previous
    // read ended mid-terminator.
    let start = scanned.saturating_sub(3).min(buf.len());
    let header_end = match buf[start..].windows(4).position(|w| w == b"\r\n\r\n") {
        Some(pos) => start + pos + 4,
        None => {
            if buf.len() > cfg.max_header_size {
                return ParseOutcome::Invalid(StatusCode::PayloadTooLarge);
            }
            *scanned = buf.len();
            return ParseOutcome::Incomplete;
        }
    };

    if header_end > cfg.max_header_size {
        return ParseOutcome::Invalid(StatusCode::PayloadTooLarge);
    }

    let head = match std::str::from_utf8(&buf[..header_end - 4]) {
        Ok(s) => s,
        Err(_) => return ParseOutcome::Invalid(StatusCode::BadRequest),
    };

    let mut lines = head.split("\r\n");

    // Request line: method SP target SP version.
    let request_line = match lines.next() {
        Some(l) => l,
        None => return ParseOutcome::Invalid(StatusCode::BadRequest),
    };
    let mut parts = request_line.splitn(3, ' ');
    let (method_token, uri, version_token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(u), Some(v)) => (m, u, v),
        _ => return ParseOutcome::Invalid(StatusCode::BadRequest),
    };

    let method = match Method::from_token(method_token) {
        Some(m) => m,
        None => return ParseOutcome::Invalid(StatusCode::MethodNotAllowed),
    };

    let version = match version_token {
        "HTTP/1.1" => Version::Http11,
        "HTTP/1.0" => Version::Http10,
        _ => return ParseOutcome::Invalid(StatusCode::BadRequest),
    };

    if uri.len() > cfg.max_uri_length {
        return ParseOutcome::Invalid(StatusCode::UriTooLong);
    }
    if uri.contains('\0') {
        return ParseOutcome::Invalid(StatusCode::BadRequest);
    }

    let (path, query_str) = match uri.split_once('?') {
        Some((p, q)) => (p, q),
        None => (uri, ""),
    };

    // Header lines.
    let mut headers = HashMap::new();
    let mut cookies = kv::Params::new();
    let mut content_length = 0usize;

    for line in lines {
        let (raw_key, raw_value) = match line.split_once(':') {
            Some(kv) => kv,
            None => return ParseOutcome::Invalid(StatusCode::BadRequest),
        };

        let key = raw_key.trim().to_ascii_lowercase();
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-') {
            return ParseOutcome::Invalid(StatusCode::BadRequest);
        }

        let value = raw_value.trim();
        // Header-injection guard: a stray CR or LF survives the line split.
        if value.bytes().any(|b| b == b'\r' || b == b'\n') {
            return ParseOutcome::Invalid(StatusCode::BadRequest);
        }

        if key == "content-length" {
            content_length = match value.parse::<usize>() {
                Ok(n) => n,
                Err(_) => return ParseOutcome::Invalid(StatusCode::BadRequest),
            };
            if content_length > cfg.max_body_size {
                return ParseOutcome::Invalid(StatusCode::PayloadTooLarge);
            }
        }

        if key == "cookie" {
            cookies = kv::decode_cookies(value);
        }

        headers.insert(key, value.to_string());
    }

    if version == Version::Http11 && !headers.contains_key("host") {
        return ParseOutcome::Invalid(StatusCode::BadRequest);
    }

    // Wait for the full body before consuming anything.
    let total = header_end + content_length;
    if buf.len() < total {
        return ParseOutcome::Incomplete;
    }

    let body = buf[header_end..total].to_vec();

    let mut form = kv::Params::new();
    if method == Method::POST && content_length > 0 {
        let urlencoded = headers
            .get("content-type")
            .map(|v| v.contains("application/x-www-form-urlencoded"))
            .unwrap_or(false);
        if urlencoded {
            if let Ok(s) = std::str::from_utf8(&body) {
                form = kv::decode(s);
            }
        }
    }

    let query = if query_str.is_empty() {
        kv::Params::new()
    } else {
        kv::decode(query_str)
    };

    let close = close_after_response(version, headers.get("connection").map(|v| v.as_str()));
    let expect_continue = headers
        .get("expect")
        .map(|v| v.eq_ignore_ascii_case("100-continue"))
        .unwrap_or(false);

    let request = Request {
        method,
        version,
        uri: uri.to_string(),
        path: path.to_string(),
        query,
        headers,
        cookies,
        form,
        body,
        close,
        expect_continue,
    };

    ParseOutcome::Complete(request, total)
}
