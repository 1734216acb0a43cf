use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::UdpSocket;

/// Practical payload limit for a single UDP datagram.
pub const MAX_DATAGRAM: usize = 65_507;

/// Sending half of the relay channel. Fire-and-forget: `send` does not
/// confirm delivery and a missing collector is not an error the caller
/// can observe beyond the local socket layer.
pub struct RelaySender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl RelaySender {
    /// Bind an ephemeral local socket aimed at the collector address.
    pub async fn bind(target: SocketAddr) -> io::Result<Self> {
        let unspecified: IpAddr = if target.is_ipv4() {
            Ipv4Addr::UNSPECIFIED.into()
        } else {
            Ipv6Addr::UNSPECIFIED.into()
        };
        let socket = UdpSocket::bind(SocketAddr::new(unspecified, 0)).await?;
        Ok(Self { socket, target })
    }

    pub async fn send(&self, payload: &[u8]) -> io::Result<usize> {
        self.socket.send_to(payload, self.target).await
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

/// Receiving half of the relay channel. The bound socket is owned
/// exclusively by the collector task.
pub struct RelayReceiver {
    socket: UdpSocket,
}

impl RelayReceiver {
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Await the next datagram. Payloads above `MAX_DATAGRAM` are
    /// truncated by the OS and surface downstream as decode failures.
    pub async fn recv(&self) -> io::Result<(Vec<u8>, SocketAddr)> {
        let mut buf = vec![0u8; MAX_DATAGRAM];
        let (len, addr) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(len);
        Ok((buf, addr))
    }
}
