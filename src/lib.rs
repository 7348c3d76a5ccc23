//! Pharos - HTTP/1.1 server core
//!
//! A minimal web-serving primitive: a TCP listener, a non-blocking
//! connection reactor (two interchangeable strategies), and an incremental
//! HTTP request parser over raw byte streams. Not a framework — no routing,
//! no middleware, no TLS.

pub mod config;
pub mod http;
pub mod reactor;
pub mod server;
