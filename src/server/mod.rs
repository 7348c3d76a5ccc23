//! Worker orchestration.
//!
//! Runs N independent single-threaded reactors, one per worker thread, each
//! accepting from its own `SO_REUSEPORT` listener on the shared endpoint.
//! Workers share nothing mutable, so no synchronization is needed between
//! them. Supervision is out of scope: a worker that exits is logged, not
//! restarted.

pub mod listener;

use std::thread;

use anyhow::Result;

use crate::config::Config;
use crate::reactor;

/// Binds the listeners and runs the configured number of workers.
///
/// A bind failure is the only fatal error; everything after that point is
/// handled (and logged) inside the worker loops. With one worker the
/// reactor runs on the calling thread. Blocks indefinitely.
pub fn run(cfg: &Config) -> Result<()> {
    // Port sharing needs SO_REUSEPORT; without it, a single worker loop.
    let workers = if cfg!(unix) { cfg.workers } else { 1 };

    if workers == 1 {
        let listener = listener::bind(&cfg.listen_addr())?;
        return reactor::run_worker(0, listener, cfg.clone());
    }

    let mut handles = Vec::with_capacity(workers);

    for id in 0..workers {
        let listener = listener::bind(&cfg.listen_addr())?;
        let cfg = cfg.clone();

        let handle = thread::Builder::new()
            .name(format!("pharos-worker-{id}"))
            .spawn(move || {
                tracing::info!(worker = id, "worker started");
                if let Err(e) = reactor::run_worker(id, listener, cfg) {
                    tracing::error!(worker = id, error = %e, "worker exited");
                }
            })?;
        handles.push(handle);
    }

    for handle in handles {
        let _ = handle.join();
    }

    Ok(())
}
