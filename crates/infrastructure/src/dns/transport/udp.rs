//! The single UDP socket shared by clients and the upstream resolver.
//!
//! Clients and the upstream both talk to the bound service port, so one
//! socket carries questions in, forwards out, answers in and replies out.

use async_trait::async_trait;
use relaydns_application::ports::{Datagram, DatagramTransport};
use relaydns_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{SocketAddr, SocketAddrV6};
use tokio::net::UdpSocket;
use tracing::info;

/// Large enough that oversize upstream datagrams are received whole and
/// rejected by size policy rather than cut by the kernel.
const RECV_BUFFER_SIZE: usize = 4096;

const SOCKET_BUFFER_BYTES: usize = 512 * 1024;

pub struct UdpTransport {
    socket: UdpSocket,
    upstream: SocketAddr,
}

impl UdpTransport {
    pub async fn bind(bind_addr: SocketAddr, upstream: SocketAddr) -> Result<Self, DomainError> {
        let socket = create_udp_socket(bind_addr)?;
        let socket = UdpSocket::from_std(socket)?;

        info!(
            bind_address = %socket.local_addr()?,
            upstream = %upstream,
            "UDP transport bound"
        );

        Ok(Self { socket, upstream })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.socket.local_addr()?)
    }

    /// An IPv6 dual-stack socket cannot address an IPv4 peer directly.
    fn outbound(&self, target: SocketAddr) -> SocketAddr {
        match (self.socket.local_addr(), target) {
            (Ok(SocketAddr::V6(_)), SocketAddr::V4(v4)) => SocketAddr::V6(SocketAddrV6::new(
                v4.ip().to_ipv6_mapped(),
                v4.port(),
                0,
                0,
            )),
            _ => target,
        }
    }
}

#[async_trait]
impl DatagramTransport for UdpTransport {
    async fn receive(&self) -> Result<Datagram, DomainError> {
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        let (len, source) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(len);
        let source = SocketAddr::new(source.ip().to_canonical(), source.port());
        Ok(Datagram::new(buf, source))
    }

    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        self.socket.send_to(payload, self.outbound(target)).await?;
        Ok(())
    }

    async fn send_to_upstream(&self, payload: &[u8]) -> Result<(), DomainError> {
        self.send_to(payload, self.upstream).await
    }

    fn upstream_addr(&self) -> SocketAddr {
        self.upstream
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> Result<std::net::UdpSocket, DomainError> {
    let socket = Socket::new(
        Domain::for_address(socket_addr),
        Type::DGRAM,
        Some(Protocol::UDP),
    )?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(SOCKET_BUFFER_BYTES)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_BYTES)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(socket.into())
}
