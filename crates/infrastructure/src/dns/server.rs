use relaydns_application::ports::DatagramTransport;
use relaydns_application::use_cases::QueryRouter;
use relaydns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, trace, warn};

/// Receive loop: one task per inbound datagram, all tracked so shutdown can
/// give them a short window to finish.
pub struct DnsServer {
    transport: Arc<dyn DatagramTransport>,
    router: Arc<QueryRouter>,
    tracker: TaskTracker,
}

impl DnsServer {
    pub fn new(transport: Arc<dyn DatagramTransport>, router: Arc<QueryRouter>) -> Self {
        Self {
            transport,
            router,
            tracker: TaskTracker::new(),
        }
    }

    pub async fn run(&self, cancel: CancellationToken) {
        info!(upstream = %self.transport.upstream_addr(), "DNS receive loop started");

        loop {
            let received = tokio::select! {
                _ = cancel.cancelled() => break,
                received = self.transport.receive() => received,
            };

            match received {
                Ok(datagram) => {
                    let router = Arc::clone(&self.router);
                    self.tracker.spawn(async move {
                        let source = datagram.source;
                        match router.handle_datagram(datagram).await {
                            Ok(outcome) => trace!(source = %source, outcome = ?outcome, "Datagram routed"),
                            Err(e) => log_route_error(&e, source),
                        }
                    });
                }
                Err(e) => warn!(error = %e, "UDP receive failed"),
            }
        }

        info!(in_flight_tasks = self.tracker.len(), "DNS receive loop stopped");
    }

    /// Waits up to `grace` for in-flight handler tasks.
    pub async fn drain(&self, grace: Duration) {
        self.tracker.close();
        if tokio::time::timeout(grace, self.tracker.wait()).await.is_err() {
            warn!(
                remaining = self.tracker.len(),
                grace_ms = grace.as_millis() as u64,
                "Shutdown grace period elapsed with handlers still running"
            );
        }
    }
}

fn log_route_error(error: &DomainError, source: SocketAddr) {
    match error {
        DomainError::MalformedPacket(_) | DomainError::InvalidDomainName(_) => {
            debug!(source = %source, error = %error, "Dropping undecodable datagram")
        }
        DomainError::TransactionIdsExhausted(_) | DomainError::PendingTableFull(_) => {
            warn!(source = %source, error = %error, "Dropping query")
        }
        _ => warn!(source = %source, error = %error, "Failed to route datagram"),
    }
}
