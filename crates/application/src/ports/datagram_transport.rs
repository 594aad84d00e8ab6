use async_trait::async_trait;
use relaydns_domain::DomainError;
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub payload: Vec<u8>,
    pub source: SocketAddr,
}

impl Datagram {
    pub fn new(payload: Vec<u8>, source: SocketAddr) -> Self {
        Self { payload, source }
    }
}

/// The single socket shared by clients and the upstream resolver.
#[async_trait]
pub trait DatagramTransport: Send + Sync {
    async fn receive(&self) -> Result<Datagram, DomainError>;

    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError>;

    async fn send_to_upstream(&self, payload: &[u8]) -> Result<(), DomainError>;

    fn upstream_addr(&self) -> SocketAddr;
}
