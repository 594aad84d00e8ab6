use relaydns_application::ports::MessageCodec;
use relaydns_domain::{DnsMessage, ResourceRecord, ResponseCode};
use relaydns_infrastructure::dns::WireCodec;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum UpstreamBehavior {
    /// Answer every question with one A record.
    Answer { ttl: u32, addr: Ipv4Addr },
    /// Record queries but never reply.
    Silent,
}

/// Loopback resolver standing in for the real upstream.
pub struct MockUpstream {
    addr: SocketAddr,
    socket: Arc<UdpSocket>,
    received: Arc<Mutex<Vec<DnsMessage>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn start(behavior: UpstreamBehavior) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await?);
        let addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_socket = socket.clone();
        let task_received = received.clone();
        tokio::spawn(async move {
            let codec = WireCodec::new();
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = task_socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Ok(query) = codec.decode(&buf[..len]) else { continue };
                        task_received.lock().unwrap().push(query.clone());

                        if let Some(reply) = Self::build_reply(&query, behavior) {
                            let bytes = codec.encode(&reply).unwrap();
                            let _ = task_socket.send_to(&bytes, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            socket,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<DnsMessage> {
        self.received.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Polls until at least `count` queries have arrived or `wait` elapses.
    pub async fn wait_for_queries(&self, count: usize, wait: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + wait;
        while tokio::time::Instant::now() < deadline {
            if self.query_count() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.query_count() >= count
    }

    /// Sends a datagram from the upstream's own address.
    pub async fn send_raw(&self, bytes: &[u8], target: SocketAddr) {
        self.socket.send_to(bytes, target).await.unwrap();
    }

    fn build_reply(query: &DnsMessage, behavior: UpstreamBehavior) -> Option<DnsMessage> {
        let UpstreamBehavior::Answer { ttl, addr } = behavior else {
            return None;
        };
        let question = query.first_question()?.clone();
        let mut reply = DnsMessage::response_to(query.id(), question.clone(), ResponseCode::NoError);
        reply.header.set_recursion_desired(query.header.recursion_desired());
        reply.header.set_recursion_available(true);
        reply
            .answers
            .push(ResourceRecord::a(question.name, ttl, addr));
        Some(reply)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
