//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: methods
//! GET/POST/HEAD, `Content-Length` framing only (no chunked encoding), and
//! keep-alive with pipelining.
//!
//! # Architecture
//!
//! - **`parser`**: incremental request parser over a rolling byte buffer
//! - **`kv`**: decoder for `&`/`=`-delimited query/form/cookie strings
//! - **`request`**: parsed request representation
//! - **`response`**: status table and response serialization
//! - **`handler`**: the downstream handler (greeting / path echo)
//! - **`connection`**: per-socket buffer state and the shared drive loop
//! - **`writer`**: async partial-write-tolerant response writer
//!
//! # Request lifecycle
//!
//! ```text
//!        ┌─────────────┐
//!        │   ingest    │ ← reactor reads up to 8 KiB into the buffer
//!        └──────┬──────┘
//!               │
//!               ▼
//!        ┌──────────────────┐
//!        │   parse loop     │ ← drain complete pipelined requests
//!        └──────┬───────────┘
//!               │ per request
//!               ▼
//!        ┌──────────────────┐
//!        │   handle         │ ← append response bytes, arrival order
//!        └──────┬───────────┘
//!               │ verdict
//!               ├─ keep-alive → wait for more bytes
//!               └─ close / invalid → flush, then close the socket
//! ```
//!
//! Parse failures never escape this module as errors: they surface as
//! `ParseOutcome::Invalid(status)`, and the connection answers with the
//! matching error response before closing.

pub mod connection;
pub mod handler;
pub mod kv;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
