//! Connection reactors.
//!
//! Two interchangeable strategies with identical external behavior, chosen
//! once at startup:
//!
//! - **`event`**: a per-worker current-thread tokio runtime with one local
//!   task per connection and a per-connection idle timer. The default.
//! - **`poll`** (unix only): a hand-rolled `poll(2)` loop over an explicit
//!   socket set, accepting first, then one bounded read per readable
//!   connection.
//!
//! Both delegate all protocol work to the shared
//! [`Connection`](crate::http::connection::Connection) drive loop; the
//! strategies differ only in how readiness is observed and how bytes move.

pub mod event;
#[cfg(unix)]
pub mod poll;

use std::net::TcpListener;

use anyhow::Result;

use crate::config::{Config, ReactorKind};

/// Runs one worker's reactor loop until the process ends.
pub fn run_worker(worker: usize, listener: TcpListener, cfg: Config) -> Result<()> {
    match cfg.reactor {
        ReactorKind::Event => event::run(worker, listener, cfg),
        #[cfg(unix)]
        ReactorKind::Poll => poll::run(worker, listener, cfg),
        #[cfg(not(unix))]
        ReactorKind::Poll => event::run(worker, listener, cfg),
    }
}
