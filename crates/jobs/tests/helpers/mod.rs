#![allow(dead_code)]

use async_trait::async_trait;
use relaydns_application::ports::{Datagram, DatagramTransport};
use relaydns_domain::{
    DnsMessage, DomainError, Question, RecordType, ResourceRecord, ResponseCode,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Mutex;

pub fn upstream_addr() -> SocketAddr {
    "198.51.100.53:53".parse().unwrap()
}

pub fn client_addr(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::new(192, 0, 2, 10), port))
}

pub fn a_answer(domain: &str, ttl: u32) -> DnsMessage {
    let mut message =
        DnsMessage::response_to(1, Question::new(domain, RecordType::A), ResponseCode::NoError);
    message
        .answers
        .push(ResourceRecord::a(domain, ttl, Ipv4Addr::new(192, 0, 2, 1)));
    message
}

/// Transport that never receives and records every datagram sent to a client.
pub struct RecordingTransport {
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatagramTransport for RecordingTransport {
    async fn receive(&self) -> Result<Datagram, DomainError> {
        std::future::pending().await
    }

    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push((payload.to_vec(), target));
        Ok(())
    }

    async fn send_to_upstream(&self, payload: &[u8]) -> Result<(), DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((payload.to_vec(), upstream_addr()));
        Ok(())
    }

    fn upstream_addr(&self) -> SocketAddr {
        upstream_addr()
    }
}
