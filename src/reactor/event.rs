//! Native event-driven reactor.
//!
//! One single-threaded tokio runtime per worker: the accept loop spawns a
//! local task per connection, and each task drives the shared connection
//! state machine. The idle timer wraps every read, so it resets on each
//! successful read and force-closes a connection that stays silent for the
//! configured duration.

use std::net::TcpListener as StdTcpListener;
use std::rc::Rc;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

use crate::config::Config;
use crate::http::connection::{Connection, READ_CHUNK, Verdict};
use crate::http::writer::ResponseWriter;

/// Runs the event reactor on the calling thread until the process ends.
pub fn run(worker: usize, listener: StdTcpListener, cfg: Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building worker runtime")?;

    let local = tokio::task::LocalSet::new();
    runtime.block_on(local.run_until(accept_loop(worker, listener, Rc::new(cfg))))
}

async fn accept_loop(worker: usize, listener: StdTcpListener, cfg: Rc<Config>) -> Result<()> {
    let listener = TcpListener::from_std(listener).context("registering listener")?;
    tracing::debug!(worker, "event reactor running");

    loop {
        let (socket, peer) = listener.accept().await?;
        tracing::debug!(worker, %peer, "accepted connection");

        let cfg = cfg.clone();
        tokio::task::spawn_local(async move {
            if let Err(e) = serve(socket, &cfg).await {
                // Transport errors end the connection, nothing more.
                tracing::debug!(%peer, error = %e, "connection closed");
            }
        });
    }
}

/// Drives one connection: read, parse, dispatch, write, repeat.
async fn serve(mut socket: TcpStream, cfg: &Config) -> Result<()> {
    let mut conn = Connection::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match timeout(cfg.idle_timeout, socket.read(&mut chunk)).await {
            Ok(read) => read?,
            Err(_) => {
                // Idle expiry: force-close, no response bytes.
                tracing::debug!("idle timeout, dropping connection");
                return Ok(());
            }
        };

        if n == 0 {
            return Ok(());
        }

        conn.ingest(&chunk[..n]);

        let mut out = Vec::new();
        let verdict = conn.process(cfg, &mut out);

        if !out.is_empty() {
            ResponseWriter::new(out).write_to_stream(&mut socket).await?;
        }

        if verdict == Verdict::Close {
            return Ok(());
        }
    }
}
