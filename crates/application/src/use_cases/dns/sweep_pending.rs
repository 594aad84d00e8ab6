use crate::ports::{DatagramTransport, MessageCodec, PendingQuery, PendingQueryTable};
use relaydns_domain::{DnsMessage, DomainError, ResponseCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepOutcome {
    pub expired: usize,
    pub servfail_sent: usize,
    pub remaining: usize,
}

/// Drops in-flight queries the upstream never answered.
///
/// By default the client gets no reply and is left to its own retry logic;
/// with `servfail_on_timeout` it receives a SERVFAIL for its question.
pub struct SweepPendingQueriesUseCase {
    pending: Arc<dyn PendingQueryTable>,
    codec: Arc<dyn MessageCodec>,
    transport: Arc<dyn DatagramTransport>,
    timeout: Duration,
    servfail_on_timeout: bool,
}

impl SweepPendingQueriesUseCase {
    pub fn new(
        pending: Arc<dyn PendingQueryTable>,
        codec: Arc<dyn MessageCodec>,
        transport: Arc<dyn DatagramTransport>,
        timeout: Duration,
    ) -> Self {
        Self {
            pending,
            codec,
            transport,
            timeout,
            servfail_on_timeout: false,
        }
    }

    pub fn with_servfail_on_timeout(mut self, enabled: bool) -> Self {
        self.servfail_on_timeout = enabled;
        self
    }

    pub async fn execute(&self) -> SweepOutcome {
        let expired = self.pending.sweep_expired(self.timeout);
        let mut servfail_sent = 0;

        for query in &expired {
            let reason = DomainError::UpstreamTimeout {
                id: query.upstream_id,
                timeout_ms: self.timeout.as_millis() as u64,
            };
            debug!(
                reason = %reason,
                client = %query.client_addr,
                domain = %query.question.name,
                record_type = %query.question.record_type,
                "Abandoning pending query"
            );

            if self.servfail_on_timeout {
                match self.send_servfail(query).await {
                    Ok(()) => servfail_sent += 1,
                    Err(e) => warn!(
                        error = %e,
                        client = %query.client_addr,
                        "Failed to send SERVFAIL for timed out query"
                    ),
                }
            }
        }

        SweepOutcome {
            expired: expired.len(),
            servfail_sent,
            remaining: self.pending.len(),
        }
    }

    async fn send_servfail(&self, query: &PendingQuery) -> Result<(), DomainError> {
        let mut reply =
            DnsMessage::response_to(query.client_id, query.question.clone(), ResponseCode::ServFail);
        reply
            .header
            .set_recursion_desired(query.recursion_desired);
        let bytes = self.codec.encode(&reply)?;
        self.transport.send_to(&bytes, query.client_addr).await
    }
}
