use std::net::{SocketAddr, TcpListener, ToSocketAddrs};

use anyhow::{Context, Result};
use socket2::{Domain, Protocol, Socket, Type};

/// Accept queue depth for every listener.
pub const BACKLOG: i32 = 2048;

/// Binds a non-blocking listener with address reuse.
///
/// On unix `SO_REUSEPORT` is also set, so every worker can bind its own
/// listener to the same endpoint and let the kernel spread incoming
/// connections across them.
pub fn bind(addr: &str) -> Result<TcpListener> {
    let addr: SocketAddr = addr
        .to_socket_addrs()
        .with_context(|| format!("resolving listen address {addr}"))?
        .next()
        .with_context(|| format!("listen address {addr} resolved to nothing"))?;

    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))
        .context("creating listener socket")?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket
        .bind(&addr.into())
        .with_context(|| format!("binding {addr}"))?;
    socket.listen(BACKLOG).context("listening")?;

    Ok(socket.into())
}
