use relaydns_domain::{DomainError, Question};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::Instant;

/// A client question that was forwarded upstream and is waiting for its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    /// Transaction ID used on the upstream leg; the table key.
    pub upstream_id: u16,
    /// Transaction ID the client used; every reply carries it.
    pub client_id: u16,
    pub client_addr: SocketAddr,
    pub question: Question,
    pub recursion_desired: bool,
    pub created_at: Instant,
}

impl PendingQuery {
    pub fn new(
        client_id: u16,
        client_addr: SocketAddr,
        question: Question,
        recursion_desired: bool,
    ) -> Self {
        Self {
            upstream_id: client_id,
            client_id,
            client_addr,
            question,
            recursion_desired,
            created_at: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    pub fn is_remapped(&self) -> bool {
        self.upstream_id != self.client_id
    }
}

/// Correlation table of in-flight upstream queries keyed by upstream ID.
///
/// Every removal is atomic: a record is handed to at most one caller.
pub trait PendingQueryTable: Send + Sync {
    /// Fails with `DuplicateKey` when the ID is already in flight; the existing
    /// record is never overwritten.
    fn add(&self, query: PendingQuery) -> Result<(), DomainError>;

    fn match_and_remove(&self, upstream_id: u16) -> Option<PendingQuery>;

    /// Removes the record only when `predicate` accepts it.
    fn match_and_remove_if(
        &self,
        upstream_id: u16,
        predicate: &(dyn Fn(&PendingQuery) -> bool + Sync),
    ) -> Option<PendingQuery>;

    /// Removes and returns every record older than `max_age`.
    fn sweep_expired(&self, max_age: Duration) -> Vec<PendingQuery>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
