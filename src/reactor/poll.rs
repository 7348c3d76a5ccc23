//! Readiness-polling reactor.
//!
//! Keeps every live socket in an explicit table keyed by file descriptor
//! and blocks on `poll(2)` with no timeout. On each wake it drains pending
//! accepts first, then performs one bounded read per readable connection.
//! Writes happen synchronously inside the dispatch cycle, so a slow client
//! stalls this worker until its response is flushed.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::os::unix::io::{AsRawFd, RawFd};

use anyhow::Result;

use crate::config::Config;
use crate::http::connection::{Connection, READ_CHUNK, Verdict};

struct Client {
    stream: TcpStream,
    conn: Connection,
}

/// Runs the polling reactor on the calling thread until the process ends.
pub fn run(worker: usize, listener: TcpListener, cfg: Config) -> Result<()> {
    tracing::debug!(worker, "poll reactor running");

    let listener_fd = listener.as_raw_fd();
    let mut clients: HashMap<RawFd, Client> = HashMap::new();

    loop {
        let mut fds: Vec<libc::pollfd> = Vec::with_capacity(clients.len() + 1);
        fds.push(libc::pollfd {
            fd: listener_fd,
            events: libc::POLLIN,
            revents: 0,
        });
        for fd in clients.keys() {
            fds.push(libc::pollfd {
                fd: *fd,
                events: libc::POLLIN,
                revents: 0,
            });
        }

        let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if rc < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err.into());
        }

        // New connections first, then readable clients.
        if (fds[0].revents & libc::POLLIN) != 0 {
            accept_pending(worker, &listener, &mut clients);
        }

        for pfd in &fds[1..] {
            if (pfd.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR)) == 0 {
                continue;
            }

            let Some(client) = clients.get_mut(&pfd.fd) else {
                continue;
            };

            if !service(client, &cfg) {
                // Drop closes the socket and frees the buffer.
                clients.remove(&pfd.fd);
            }
        }
    }
}

fn accept_pending(worker: usize, listener: &TcpListener, clients: &mut HashMap<RawFd, Client>) {
    loop {
        match listener.accept() {
            Ok((stream, peer)) => {
                if let Err(e) = stream.set_nonblocking(true) {
                    tracing::warn!(worker, %peer, error = %e, "set_nonblocking failed");
                    continue;
                }
                tracing::debug!(worker, %peer, "accepted connection");
                clients.insert(
                    stream.as_raw_fd(),
                    Client {
                        stream,
                        conn: Connection::new(),
                    },
                );
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
            Err(e) => {
                tracing::warn!(worker, error = %e, "accept failed");
                break;
            }
        }
    }
}

/// One bounded read plus a parse/dispatch cycle.
///
/// Returns `false` when the connection must be torn down.
fn service(client: &mut Client, cfg: &Config) -> bool {
    let mut chunk = [0u8; READ_CHUNK];

    let n = match client.stream.read(&mut chunk) {
        Ok(0) => return false,
        Ok(n) => n,
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => return true,
        Err(e) if e.kind() == io::ErrorKind::Interrupted => return true,
        Err(_) => return false,
    };

    client.conn.ingest(&chunk[..n]);

    let mut out = Vec::new();
    let verdict = client.conn.process(cfg, &mut out);

    if !out.is_empty() && !write_all(&mut client.stream, &out) {
        return false;
    }

    verdict == Verdict::KeepOpen
}

/// Short writes re-attempt the remaining suffix; a zero-byte write or an
/// I/O error abandons the response.
fn write_all(stream: &mut TcpStream, mut buf: &[u8]) -> bool {
    while !buf.is_empty() {
        match stream.write(buf) {
            Ok(0) => return false,
            Ok(n) => buf = &buf[n..],
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                if !wait_writable(stream.as_raw_fd()) {
                    return false;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(_) => return false,
        }
    }
    true
}

fn wait_writable(fd: RawFd) -> bool {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };

    loop {
        let rc = unsafe { libc::poll(&mut pfd, 1, -1) };
        if rc >= 0 {
            return true;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return false;
        }
    }
}
