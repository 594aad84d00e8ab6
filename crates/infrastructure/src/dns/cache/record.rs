use relaydns_domain::DnsMessage;
use std::time::Duration;
use tokio::time::Instant;

/// A cached upstream answer and its lifetime.
#[derive(Debug, Clone)]
pub struct CachedAnswer {
    pub message: DnsMessage,
    pub inserted_at: Instant,
    pub expires_at: Instant,
    pub ttl: u32,
}

impl CachedAnswer {
    pub fn new(message: DnsMessage, ttl: u32) -> Self {
        let inserted_at = Instant::now();
        Self {
            message,
            inserted_at,
            expires_at: inserted_at + Duration::from_secs(ttl as u64),
            ttl,
        }
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn elapsed_secs_at(&self, now: Instant) -> u32 {
        now.saturating_duration_since(self.inserted_at).as_secs() as u32
    }

    pub fn remaining_ttl_at(&self, now: Instant) -> u32 {
        self.ttl.saturating_sub(self.elapsed_secs_at(now))
    }

    /// Copy of the message with every TTL lowered by the time spent in cache.
    pub fn aged_message_at(&self, now: Instant) -> DnsMessage {
        let mut message = self.message.clone();
        message.age_ttls(self.elapsed_secs_at(now));
        message
    }
}
