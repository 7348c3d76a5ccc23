//! The downstream request handler.
//!
//! Deliberately trivial: a fixed greeting for the root path and a path echo
//! for everything else, standing in for arbitrary application logic. Handler
//! work runs inline on the worker's event loop, so it must stay short and
//! non-blocking.

use crate::http::request::Request;
use crate::http::response::Response;

/// Serializes the response for `req` onto `out`.
///
/// Emits an interim `100 Continue` first when the client asked for one.
/// The `Connection` header mirrors the request's close decision. HEAD gets
/// the same bytes as GET.
pub fn handle(req: &Request, out: &mut Vec<u8>) {
    if req.expect_continue {
        out.extend_from_slice(b"HTTP/1.1 100 Continue\r\n\r\n");
    }

    let keep_alive = !req.close;

    if req.path == "/" {
        Response::ok("hello", keep_alive).write_to(out);
    } else {
        Response::ok(format!("Path: {}", req.uri), keep_alive).write_to(out);
    }
}
