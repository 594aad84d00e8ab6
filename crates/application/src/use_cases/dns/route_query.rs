use crate::ports::{
    AnswerCache, CachePutOutcome, Datagram, DatagramTransport, MessageCodec, PendingQuery,
    PendingQueryTable, TransactionIdSource,
};
use relaydns_domain::{CacheKey, DnsMessage, DomainError, Question};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_ID_ALLOCATION_ATTEMPTS: usize = 16;

/// What the router did with one inbound datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Question answered from the cache.
    CacheHit,
    /// Question forwarded upstream under `upstream_id`.
    Forwarded { upstream_id: u16, remapped: bool },
    /// Upstream answer relayed to the waiting client.
    Relayed { cached: bool },
    /// Upstream answer did not fit a datagram; the client got a TC reply.
    RelayedTruncated,
    /// Answer with no matching in-flight query.
    Unsolicited,
    /// Message without a question.
    Discarded,
}

/// Classifies every inbound datagram and drives the cache, the in-flight
/// table and the transport accordingly.
pub struct QueryRouter {
    codec: Arc<dyn MessageCodec>,
    transport: Arc<dyn DatagramTransport>,
    cache: Arc<dyn AnswerCache>,
    pending: Arc<dyn PendingQueryTable>,
    ids: Arc<dyn TransactionIdSource>,
    id_allocation_attempts: usize,
}

impl QueryRouter {
    pub fn new(
        codec: Arc<dyn MessageCodec>,
        transport: Arc<dyn DatagramTransport>,
        cache: Arc<dyn AnswerCache>,
        pending: Arc<dyn PendingQueryTable>,
        ids: Arc<dyn TransactionIdSource>,
    ) -> Self {
        Self {
            codec,
            transport,
            cache,
            pending,
            ids,
            id_allocation_attempts: DEFAULT_ID_ALLOCATION_ATTEMPTS,
        }
    }

    pub fn with_id_allocation_attempts(mut self, attempts: usize) -> Self {
        self.id_allocation_attempts = attempts;
        self
    }

    pub async fn handle_datagram(&self, datagram: Datagram) -> Result<RouteOutcome, DomainError> {
        let message = self.codec.decode(&datagram.payload)?;

        let Some(question) = message.first_question().cloned() else {
            debug!(source = %datagram.source, id = message.id(), "Discarding message without a question");
            return Ok(RouteOutcome::Discarded);
        };

        if message.is_response() {
            self.relay_answer(message, question, datagram.source).await
        } else {
            self.answer_question(message, question, datagram.source)
                .await
        }
    }

    async fn answer_question(
        &self,
        query: DnsMessage,
        question: Question,
        client: SocketAddr,
    ) -> Result<RouteOutcome, DomainError> {
        let key = CacheKey::from_question(&question);

        if let Some(mut cached) = self.cache.lookup(&key) {
            cached.header.id = query.id();
            cached
                .header
                .set_recursion_desired(query.header.recursion_desired());
            cached.questions = query.questions;

            let (bytes, _) = self.encode_reply(&cached)?;
            self.transport.send_to(&bytes, client).await?;

            debug!(client = %client, key = %key, "Answered from cache");
            return Ok(RouteOutcome::CacheHit);
        }

        let record = PendingQuery::new(
            query.id(),
            client,
            question,
            query.header.recursion_desired(),
        );
        let registered = self.register_pending(record)?;
        let upstream_id = registered.upstream_id;
        let remapped = registered.is_remapped();

        let mut forward = query;
        forward.header.id = upstream_id;
        forward.strip_edns();

        if let Err(e) = self.send_upstream(&forward).await {
            self.release_pending(&registered);
            return Err(e);
        }

        debug!(
            client = %client,
            key = %key,
            upstream_id = upstream_id,
            remapped = remapped,
            "Forwarded query upstream"
        );
        Ok(RouteOutcome::Forwarded {
            upstream_id,
            remapped,
        })
    }

    async fn relay_answer(
        &self,
        answer: DnsMessage,
        question: Question,
        source: SocketAddr,
    ) -> Result<RouteOutcome, DomainError> {
        let upstream = self.transport.upstream_addr();
        if source != upstream {
            debug!(source = %source, upstream = %upstream, "Answer from a non-upstream address");
        }

        let key = CacheKey::from_question(&question);
        let Some(pending) = self.pending.match_and_remove_if(answer.id(), &|p| {
            CacheKey::from_question(&p.question) == key
        }) else {
            debug!(source = %source, id = answer.id(), key = %key, "Dropping unsolicited answer");
            return Ok(RouteOutcome::Unsolicited);
        };

        let mut relay = answer;
        relay.header.id = pending.client_id;
        relay
            .header
            .set_recursion_desired(pending.recursion_desired);
        relay.questions[0] = pending.question;

        let (bytes, truncated) = self.encode_reply(&relay)?;

        let cached = if truncated {
            false
        } else {
            match self.cache.put(key.clone(), &relay) {
                CachePutOutcome::Stored { ttl, evicted } => {
                    debug!(key = %key, ttl = ttl, evicted = evicted, "Cached upstream answer");
                    true
                }
                CachePutOutcome::Skipped(reason) => {
                    debug!(key = %key, reason = ?reason, "Upstream answer not cached");
                    false
                }
            }
        };

        self.transport.send_to(&bytes, pending.client_addr).await?;

        if truncated {
            warn!(
                client = %pending.client_addr,
                key = %key,
                "Upstream answer exceeds the UDP limit, relayed truncated"
            );
            Ok(RouteOutcome::RelayedTruncated)
        } else {
            Ok(RouteOutcome::Relayed { cached })
        }
    }

    /// Keys the record by the client's own ID when it is free, otherwise by a
    /// fresh one from the ID source.
    fn register_pending(&self, mut record: PendingQuery) -> Result<PendingQuery, DomainError> {
        match self.pending.add(record.clone()) {
            Ok(()) => return Ok(record),
            Err(DomainError::DuplicateKey(_)) => {}
            Err(e) => return Err(e),
        }

        for _ in 0..self.id_allocation_attempts {
            record.upstream_id = self.ids.next_id();
            match self.pending.add(record.clone()) {
                Ok(()) => return Ok(record),
                Err(DomainError::DuplicateKey(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::TransactionIdsExhausted(
            self.id_allocation_attempts,
        ))
    }

    /// Undoes `register_pending` after a failed forward, unless an answer has
    /// already consumed the record.
    fn release_pending(&self, registered: &PendingQuery) {
        self.pending.match_and_remove_if(registered.upstream_id, &|p| {
            p.client_addr == registered.client_addr && p.client_id == registered.client_id
        });
    }

    async fn send_upstream(&self, message: &DnsMessage) -> Result<(), DomainError> {
        let bytes = self.codec.encode(message)?;
        self.transport.send_to_upstream(&bytes).await
    }

    /// Encodes a reply for a client, falling back to a header-and-question
    /// reply with TC set when the full message is over the size limit.
    fn encode_reply(&self, message: &DnsMessage) -> Result<(Vec<u8>, bool), DomainError> {
        match self.codec.encode(message) {
            Ok(bytes) => Ok((bytes, false)),
            Err(e) if e.is_size_limit() => {
                let bytes = self.codec.encode(&message.truncated_copy())?;
                Ok((bytes, true))
            }
            Err(e) => Err(e),
        }
    }
}
