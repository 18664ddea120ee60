use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use crate::error::{ConfigError, TransportError};

/// Fire-and-forget datagram sink. One call, one attempt, no retry.
pub trait Transport {
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError>;
}

/// UDP transport bound once at startup. The socket is closed on drop.
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Resolve `host:port` and bind an ephemeral local socket of the same
    /// address family.
    pub fn new(host: &str, port: u16) -> Result<Self, ConfigError> {
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidHost(host.to_string()));
        }
        if port == 0 {
            return Err(ConfigError::InvalidPort(0));
        }

        let target = (host, port)
            .to_socket_addrs()
            .map_err(|_| ConfigError::Unresolvable(format!("{}:{}", host, port)))?
            .next()
            .ok_or_else(|| ConfigError::Unresolvable(format!("{}:{}", host, port)))?;

        let local = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local)?;
        log::debug!("udp socket bound to {:?}, target {}", socket.local_addr().ok(), target);

        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, datagram: &[u8]) -> Result<(), TransportError> {
        self.socket.send_to(datagram, self.target)?;
        Ok(())
    }
}
