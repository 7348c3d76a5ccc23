use bytes::{Buf, BytesMut};

use crate::config::Config;
use crate::http::handler;
use crate::http::parser::{self, ParseOutcome};
use crate::http::response::Response;

/// How many bytes a reactor reads from a socket per readiness event.
pub const READ_CHUNK: usize = 8192;

/// What the reactor must do with the connection after a process cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Flush pending output and keep the connection open
    KeepOpen,
    /// Flush pending output, then close the socket
    Close,
}

/// Per-socket parse state, owned exclusively by the reactor that accepted
/// the socket.
///
/// Holds the rolling receive buffer and the terminator-scan cursor. The
/// socket handle, idle timer, and all I/O stay with the reactor strategy;
/// this type is the part both strategies share.
pub struct Connection {
    buffer: BytesMut,
    scanned: usize,
}

impl Connection {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(READ_CHUNK / 2),
            scanned: 0,
        }
    }

    /// Appends freshly read bytes to the receive buffer.
    pub fn ingest(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Bytes currently buffered and not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drains every complete pipelined request from the buffer, appending
    /// each response (in arrival order) to `out`.
    ///
    /// Stops at the first `Incomplete` or `Invalid`; an invalid request
    /// appends the error response and demands closure. Consumed bytes are
    /// dropped once at the end of the cycle, not per request.
    pub fn process(&mut self, cfg: &Config, out: &mut Vec<u8>) -> Verdict {
        let mut cursor = 0;

        let verdict = loop {
            match parser::parse(&self.buffer[cursor..], &mut self.scanned, cfg) {
                ParseOutcome::Complete(request, consumed) => {
                    cursor += consumed;
                    self.scanned = 0;
                    let close = request.close;
                    handler::handle(&request, out);
                    if close {
                        break Verdict::Close;
                    }
                }
                ParseOutcome::Incomplete => break Verdict::KeepOpen,
                ParseOutcome::Invalid(status) => {
                    Response::error(status).write_to(out);
                    break Verdict::Close;
                }
            }
        };

        if cursor > 0 {
            self.buffer.advance(cursor);
        }

        verdict
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}
